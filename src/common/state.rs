// Application state shared across all modules

use crate::accounts::AccountService;

/// Read-only state handed to every handler behind an `Arc`
///
/// The token signing key lives inside `accounts` and is never mutated after
/// startup.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
}
