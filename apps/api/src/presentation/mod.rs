// Presentation sessions: the server-side view state that sequences a
// submission through loading → success/error and owns the displayed result
// and its translated copy.

pub mod handlers;
pub mod session;
pub mod store;
pub mod view;
