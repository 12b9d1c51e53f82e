//! Request validation against a layout.

use crate::schema::{Layout, RouteRequest};
use crate::{LayoutError, LayoutResult};

/// Every request must be non-empty and name only known components
/// (the ignore marker is stripped from the last name first).
pub fn validate_requests(
    layout: &Layout,
    requests: &[RouteRequest],
    marker: &str,
) -> LayoutResult<()> {
    for (request, req) in requests.iter().enumerate() {
        if req.names.is_empty() {
            return Err(LayoutError::EmptyRequest { request });
        }
        for name in req.stripped_names(marker) {
            if layout.get(name).is_none() {
                return Err(LayoutError::UnknownComponent {
                    request,
                    name: name.to_string(),
                });
            }
        }
    }
    Ok(())
}
