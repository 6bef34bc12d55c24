#![forbid(unsafe_code)]

use poem::Route;

pub mod hello;

// ---------------------------------------------------------------------------
// hello_routes:
// ---------------------------------------------------------------------------
/** Build the complete route table.  Mounting the handler with at() rather
 * than a method-specific wrapper means every HTTP method on "/" gets the
 * greeting; unmatched paths fall through to poem's default 404.
 */
pub fn hello_routes() -> Route {
    Route::new().at("/", hello::hello)
}
