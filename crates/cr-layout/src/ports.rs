//! Nearest inflow/outflow port assignment.
//!
//! Each request's head is fed from the nearest inflow port and its tail
//! drains to the nearest outflow port (centre-to-centre distance). A port
//! may serve at most `reuse_limit` names; once every port of a kind is at
//! the limit the nearest one is reused anyway and a warning is logged.

use std::collections::BTreeMap;

use tracing::warn;

use crate::schema::{Component, ComponentKind, Layout, RouteRequest};
use crate::{LayoutError, LayoutResult};

/// Name → port name maps for request heads and tails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortAssignment {
    inflow: BTreeMap<String, String>,
    outflow: BTreeMap<String, String>,
}

impl PortAssignment {
    pub fn new(inflow: BTreeMap<String, String>, outflow: BTreeMap<String, String>) -> Self {
        Self { inflow, outflow }
    }

    pub fn nearest_in(&self, name: &str) -> Option<&str> {
        self.inflow.get(name).map(String::as_str)
    }

    pub fn nearest_out(&self, name: &str) -> Option<&str> {
        self.outflow.get(name).map(String::as_str)
    }

    pub fn inflow(&self) -> &BTreeMap<String, String> {
        &self.inflow
    }

    pub fn outflow(&self) -> &BTreeMap<String, String> {
        &self.outflow
    }
}

struct PortPool<'a> {
    kind: ComponentKind,
    ports: Vec<&'a Component>,
    uses: Vec<usize>,
    reuse_limit: usize,
}

impl<'a> PortPool<'a> {
    fn new(layout: &'a Layout, kind: ComponentKind, reuse_limit: usize) -> Self {
        let ports: Vec<&Component> = layout.of_kind(kind).collect();
        let uses = vec![0; ports.len()];
        Self {
            kind,
            ports,
            uses,
            reuse_limit,
        }
    }

    /// Nearest port with spare capacity, else the nearest overall.
    /// Ties go to the port listed first in the layout.
    fn take(&mut self, target: &Component) -> LayoutResult<&'a Component> {
        if self.ports.is_empty() {
            return Err(LayoutError::NoPorts { kind: self.kind });
        }

        let nearest = |limit: Option<usize>| -> Option<usize> {
            let mut best: Option<(usize, f64)> = None;
            for (i, port) in self.ports.iter().enumerate() {
                if limit.is_some_and(|l| self.uses[i] >= l) {
                    continue;
                }
                let d = port.center.distance(target.center);
                if best.is_none_or(|(_, bd)| d < bd) {
                    best = Some((i, d));
                }
            }
            best.map(|(i, _)| i)
        };

        let index = match nearest(Some(self.reuse_limit)) {
            Some(i) => i,
            None => {
                warn!(
                    kind = %self.kind,
                    target = %target.name,
                    limit = self.reuse_limit,
                    "every port is at its reuse limit; reusing the nearest"
                );
                nearest(None).unwrap_or(0)
            }
        };
        self.uses[index] += 1;
        Ok(self.ports[index])
    }
}

/// Assign ports to request heads and (marker-stripped) tails, in request
/// order. A name assigned once keeps its port for later requests.
pub fn assign_ports(
    layout: &Layout,
    requests: &[RouteRequest],
    marker: &str,
    reuse_limit: usize,
) -> LayoutResult<PortAssignment> {
    let mut inflow_pool = PortPool::new(layout, ComponentKind::InflowPort, reuse_limit);
    let mut outflow_pool = PortPool::new(layout, ComponentKind::OutflowPort, reuse_limit);
    let mut assignment = PortAssignment::default();

    for (request, req) in requests.iter().enumerate() {
        let lookup = |name: &str| {
            layout.get(name).ok_or_else(|| LayoutError::UnknownComponent {
                request,
                name: name.to_string(),
            })
        };

        let (Some(head), Some(tail)) = (req.head(), req.tail(marker)) else {
            return Err(LayoutError::EmptyRequest { request });
        };

        if !assignment.inflow.contains_key(head) {
            let port = inflow_pool.take(lookup(head)?)?;
            assignment
                .inflow
                .insert(head.to_string(), port.name.clone());
        }
        if !assignment.outflow.contains_key(tail) {
            let port = outflow_pool.take(lookup(tail)?)?;
            assignment
                .outflow
                .insert(tail.to_string(), port.name.clone());
        }
    }

    Ok(assignment)
}
