//! Route Table Index
//!
//! The navigable surface is authored in three access-segregated modules so that a
//! route's requirement is visible where it is declared. `route_table` assembles
//! them into the single validated table used for every navigation.

use crate::router::{RouteRecord, RouteTable, RouteTableError};

/// Routes open to anonymous visitors: the entry redirect, login and registration.
pub mod public;

/// Routes that need a session token. Any authenticated role may enter.
pub mod authenticated;

/// The admin section. Requires a token and the `admin` role.
pub mod admin;

/// All route records in declaration order.
pub fn route_records() -> Vec<RouteRecord> {
    let mut records = public::public_routes();
    records.extend(authenticated::authenticated_routes());
    records.extend(admin::admin_routes());
    records
}

/// Builds the application route table, rejecting duplicate or overlapping patterns.
pub fn route_table() -> Result<RouteTable, RouteTableError> {
    RouteTable::new(route_records())
}
