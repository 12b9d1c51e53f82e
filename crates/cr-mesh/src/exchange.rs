//! Plain-text point/edge exchange format.
//!
//! ```text
//! <vertex_count> <edge_count>
//! <x> <y>            (vertex_count lines)
//! <index_a> <index_b> (edge_count lines, 0-based)
//! ```

use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use cr_core::{Point, ensure_finite};

use crate::error::{MeshError, MeshResult};
use crate::triangulation::TriangulationInput;

/// Read an exchange file from disk.
pub fn read_input(path: &Path) -> MeshResult<TriangulationInput> {
    let content = std::fs::read_to_string(path)?;
    parse_input(&content)
}

/// Write an exchange file to disk.
pub fn write_input(path: &Path, input: &TriangulationInput) -> MeshResult<()> {
    input.validate()?;
    std::fs::write(path, format_input(input))?;
    Ok(())
}

/// Render an input in exchange format.
pub fn format_input(input: &TriangulationInput) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", input.vertices.len(), input.edges.len());
    for v in &input.vertices {
        let _ = writeln!(out, "{} {}", v.x, v.y);
    }
    for [a, b] in &input.edges {
        let _ = writeln!(out, "{} {}", a, b);
    }
    out
}

/// Parse exchange-format text.
pub fn parse_input(content: &str) -> MeshResult<TriangulationInput> {
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (line, header) = lines.next().ok_or(MeshError::Parse {
        line: 1,
        what: "missing header".to_string(),
    })?;
    let [vertex_count, edge_count]: [usize; 2] = parse_pair(line, header)?;
    let mut last = line;

    let mut vertices = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        let (line, text) = next_line(&mut lines, last, "vertex")?;
        last = line;
        let [x, y]: [f64; 2] = parse_pair(line, text)?;
        vertices.push(Point::new(
            ensure_finite(x, "vertex x")?,
            ensure_finite(y, "vertex y")?,
        ));
    }

    let mut edges = Vec::with_capacity(edge_count);
    for _ in 0..edge_count {
        let (line, text) = next_line(&mut lines, last, "edge")?;
        last = line;
        edges.push(parse_pair::<usize>(line, text)?);
    }

    let input = TriangulationInput::new(vertices, edges);
    input.validate()?;
    Ok(input)
}

/// Next non-blank line; at end of input the error points one past `last`.
fn next_line<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    last: usize,
    what: &str,
) -> MeshResult<(usize, &'a str)> {
    lines.next().ok_or_else(|| MeshError::Parse {
        line: last + 1,
        what: format!("unexpected end of input while reading {what}"),
    })
}

fn parse_pair<T: FromStr>(line: usize, text: &str) -> MeshResult<[T; 2]> {
    let mut fields = text.split_whitespace();
    let mut field = || -> MeshResult<T> {
        let raw = fields.next().ok_or_else(|| MeshError::Parse {
            line,
            what: "expected two fields".to_string(),
        })?;
        raw.parse().map_err(|_| MeshError::Parse {
            line,
            what: format!("invalid number '{raw}'"),
        })
    };
    let a = field()?;
    let b = field()?;
    if fields.next().is_some() {
        return Err(MeshError::Parse {
            line,
            what: "trailing fields".to_string(),
        });
    }
    Ok([a, b])
}
