#![forbid(unsafe_code)]

use poem::handler;

// ***************************************************************************
//                                Constants
// ***************************************************************************
// The one and only response body this server produces.
pub const GREETING : &str = "Hello World!";

// ***************************************************************************
//                                 Handler
// ***************************************************************************
// ---------------------------------------------------------------------------
// hello:
// ---------------------------------------------------------------------------
/** Answer any request to "/" with a 200 and the fixed greeting. */
#[handler]
pub fn hello() -> &'static str {
    GREETING
}
