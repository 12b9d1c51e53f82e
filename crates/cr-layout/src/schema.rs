//! Layout schema: components, the immutable layout value, route requests.

use std::collections::HashMap;
use std::fmt;

use cr_core::{Point, Real};
use serde::{Deserialize, Serialize};

use crate::{LayoutError, LayoutResult};

/// Component classification, taken from the leading letter of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// `d...`: a device on the chip.
    Device,
    /// `f...`: a port where flow enters.
    InflowPort,
    /// `w...`: a port where flow leaves.
    OutflowPort,
}

impl ComponentKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.chars().next()? {
            'd' => Some(Self::Device),
            'f' => Some(Self::InflowPort),
            'w' => Some(Self::OutflowPort),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Device => "device",
            Self::InflowPort => "inflow-port",
            Self::OutflowPort => "outflow-port",
        };
        f.write_str(label)
    }
}

/// A named rectangular footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub kind: ComponentKind,
    pub center: Point,
    pub height: Real,
    pub width: Real,
}

impl Component {
    /// Build a component, classifying it by name.
    pub fn new(
        name: impl Into<String>,
        center: Point,
        height: Real,
        width: Real,
    ) -> LayoutResult<Self> {
        let name = name.into();
        let kind = ComponentKind::from_name(&name)
            .ok_or_else(|| LayoutError::UnknownKind { name: name.clone() })?;
        Ok(Self {
            name,
            kind,
            center,
            height,
            width,
        })
    }

    /// Corners in the order left-top, left-bottom, right-bottom, right-top.
    pub fn corners(&self) -> [Point; 4] {
        rect_corners(self.center, self.height, self.width)
    }

    /// The four sides as corner pairs: (lt, lb), (lb, rb), (rb, rt), (rt, lt).
    pub fn sides(&self) -> [(Point, Point); 4] {
        rect_sides(self.corners())
    }
}

pub(crate) fn rect_corners(center: Point, height: Real, width: Real) -> [Point; 4] {
    let (hw, hh) = (width / 2.0, height / 2.0);
    [
        Point::new(center.x - hw, center.y + hh),
        Point::new(center.x - hw, center.y - hh),
        Point::new(center.x + hw, center.y - hh),
        Point::new(center.x + hw, center.y + hh),
    ]
}

pub(crate) fn rect_sides(c: [Point; 4]) -> [(Point, Point); 4] {
    [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
}

/// Immutable name → component registry.
///
/// Passed explicitly into every routing call; there is no process-wide
/// registry.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    components: Vec<Component>,
    by_name: HashMap<String, usize>,
}

impl Layout {
    /// Build a layout, rejecting duplicate names. File order is preserved.
    pub fn new(components: Vec<Component>) -> LayoutResult<Self> {
        let mut by_name = HashMap::with_capacity(components.len());
        for (i, comp) in components.iter().enumerate() {
            if by_name.insert(comp.name.clone(), i).is_some() {
                return Err(LayoutError::DuplicateName {
                    name: comp.name.clone(),
                });
            }
        }
        Ok(Self {
            components,
            by_name,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Component> {
        self.by_name.get(name).map(|&i| &self.components[i])
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components of one kind, in layout order.
    pub fn of_kind(&self, kind: ComponentKind) -> impl Iterator<Item = &Component> + '_ {
        self.components.iter().filter(move |c| c.kind == kind)
    }
}

/// One logical flow path: an ordered list of component names.
///
/// The last name may carry an ignore-marker suffix which is stripped before
/// any lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub names: Vec<String>,
}

impl RouteRequest {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn head(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// Last name with the ignore marker removed, if present.
    pub fn tail(&self, marker: &str) -> Option<&str> {
        let last = self.names.last()?;
        Some(strip_marker(last, marker))
    }

    /// All names with the marker stripped from the last one.
    pub fn stripped_names<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let last = self.names.len().saturating_sub(1);
        self.names.iter().enumerate().map(move |(i, name)| {
            if i == last {
                strip_marker(name, marker)
            } else {
                name.as_str()
            }
        })
    }
}

fn strip_marker<'a>(name: &'a str, marker: &str) -> &'a str {
    if marker.is_empty() {
        return name;
    }
    name.strip_suffix(marker).unwrap_or(name)
}
