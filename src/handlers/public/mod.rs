// handlers/public/mod.rs - Public pages (no session required)
//
// The guard still runs on every GET: a signed-in user is sent on to the
// dashboard, and the confirmation page only admits arrivals from sign-in.

pub mod confirm;
pub mod root;
pub mod sign_in;

pub use confirm::page as confirm_page;
pub use confirm::submit as confirm_submit;
pub use root::get as root;
pub use root::not_found;
pub use sign_in::page as sign_in_page;
pub use sign_in::submit as sign_in_submit;
