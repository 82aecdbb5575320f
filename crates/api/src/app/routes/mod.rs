use crate::app::route_group::RouteGroup;
use crate::middleware;

use fedsvc_auth::SharedSecret;

pub mod federations;
pub mod system;

/// Route group for all authenticated `/federations` endpoints.
pub fn federations_group(secret: SharedSecret) -> RouteGroup {
    let mut group = RouteGroup::new("/federations");
    group.use_middleware([middleware::authorize(secret)]);
    federations::register(&mut group);
    group
}
