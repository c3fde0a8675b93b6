pub mod cors;
pub mod request_trace;
pub mod require_role;
pub mod token_auth;
pub mod trace_span;

pub use cors::cors_middleware;
pub use request_trace::RequestTrace;
pub use require_role::RequireRole;
pub use token_auth::TokenAuth;
pub use trace_span::TraceSpan;
