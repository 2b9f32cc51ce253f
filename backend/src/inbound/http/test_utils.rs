//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{MockOrdersService, MockUsersService};
use crate::inbound::http::state::HttpState;

/// Build handler state from mocked driving ports.
pub fn state_with(users: MockUsersService, orders: MockOrdersService) -> HttpState {
    HttpState::new(Arc::new(users), Arc::new(orders))
}
