//! Tab-separated layout and request file parsing.
//!
//! Layout: `<name>\t<center_x>\t<center_y>\t<height>\t<width>` per line.
//! Requests: one request per line, each field a component name.
//! Blank lines are ignored in both.

use std::path::Path;

use cr_core::{Point, ensure_finite, ensure_positive};

use crate::schema::{Component, Layout, RouteRequest};
use crate::{LayoutError, LayoutResult};

/// Load a layout file.
pub fn load_layout(path: &Path) -> LayoutResult<Layout> {
    let content = std::fs::read_to_string(path)?;
    parse_layout(&content)
}

/// Load a route request file.
pub fn load_requests(path: &Path) -> LayoutResult<Vec<RouteRequest>> {
    let content = std::fs::read_to_string(path)?;
    parse_requests(&content)
}

pub fn parse_layout(content: &str) -> LayoutResult<Layout> {
    let mut components = Vec::new();
    for (i, raw) in content.lines().enumerate() {
        let line = i + 1;
        if raw.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = raw.split('\t').map(str::trim).collect();
        let &[name, cx, cy, height, width] = fields.as_slice() else {
            return Err(LayoutError::Parse {
                line,
                what: format!("expected 5 tab-separated fields, found {}", fields.len()),
            });
        };

        let number = |text: &str, what: &'static str| -> LayoutResult<f64> {
            let v: f64 = text.parse().map_err(|_| LayoutError::Parse {
                line,
                what: format!("invalid {what} '{text}'"),
            })?;
            Ok(ensure_finite(v, what)?)
        };

        let center = Point::new(number(cx, "center x")?, number(cy, "center y")?);
        let height = ensure_positive(number(height, "height")?, "height")?;
        let width = ensure_positive(number(width, "width")?, "width")?;
        components.push(Component::new(name, center, height, width)?);
    }
    Layout::new(components)
}

pub fn parse_requests(content: &str) -> LayoutResult<Vec<RouteRequest>> {
    Ok(content
        .lines()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| RouteRequest::new(raw.split('\t').map(str::trim).filter(|f| !f.is_empty())))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ComponentKind;

    const LAYOUT: &str = "d1\t20\t20\t15\t15\nd2\t20\t50\t15\t15\nf1\t5\t35\t5\t5\nw1\t65\t35\t5\t5\n";

    #[test]
    fn parse_sample_layout() {
        let layout = parse_layout(LAYOUT).unwrap();
        assert_eq!(layout.len(), 4);
        let d1 = layout.get("d1").unwrap();
        assert_eq!(d1.kind, ComponentKind::Device);
        assert_eq!(d1.center, Point::new(20.0, 20.0));
        assert_eq!(layout.get("f1").unwrap().kind, ComponentKind::InflowPort);
        assert_eq!(layout.get("w1").unwrap().kind, ComponentKind::OutflowPort);
    }

    #[test]
    fn blank_lines_and_crlf_are_tolerated() {
        let layout = parse_layout("d1\t1\t1\t1\t1\r\n\r\nd2\t4\t4\t1\t1\r\n").unwrap();
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn wrong_field_count_reports_line() {
        let err = parse_layout("d1\t1\t1\t1\t1\nd2\t1\t1\n").unwrap_err();
        assert!(matches!(err, LayoutError::Parse { line: 2, .. }));
    }

    #[test]
    fn non_positive_size_rejected() {
        assert!(parse_layout("d1\t1\t1\t0\t1\n").is_err());
        assert!(parse_layout("d1\t1\t1\t1\t-3\n").is_err());
        assert!(parse_layout("d1\tNaN\t1\t1\t1\n").is_err());
    }

    #[test]
    fn unknown_kind_rejected() {
        let err = parse_layout("q1\t1\t1\t1\t1\n").unwrap_err();
        assert!(matches!(err, LayoutError::UnknownKind { .. }));
    }

    #[test]
    fn parse_request_lines() {
        let reqs = parse_requests("d1\td2\n\nd2\td1*\t\n").unwrap();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].names, vec!["d1", "d2"]);
        assert_eq!(reqs[1].names, vec!["d2", "d1*"]);
    }
}
