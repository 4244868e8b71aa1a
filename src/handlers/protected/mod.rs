// handlers/protected/mod.rs - Signed-in pages and the record API
//
// Page GETs have already passed the navigation guard. Record API calls are
// not navigations; they read the session store through `CurrentSession`
// and answer 401 when it is empty.

pub mod dashboard;
pub mod model;
pub mod records;
pub mod sign_out;

pub use dashboard::get as dashboard;
pub use model::detail as model_detail;
pub use model::list as model_list;
pub use records::delete as record_delete;
pub use records::get as record_get;
pub use records::put as record_put;
pub use sign_out::post as sign_out;
