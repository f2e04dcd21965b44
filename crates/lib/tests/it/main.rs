/*! Integration tests for formshape.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - path: Tests for dotted-path reads, writes and deletes on PathStore
 * - schema: Tests for field specs, ranges and structural validation
 * - dataobj: Tests for schema-mediated field access on DataObj
 * - form: Tests for capturing forms into objects and populating forms from objects
 * - repeatable: Tests for adding and removing repeatable sections
 * - client: Tests for the CRUD, autocomplete and fragment clients over a mock transport
 * - render: Tests for result rendering and escaping
 * - account: Tests for the account record and its renderer
 * - config: Tests for loading client configuration files
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("formshape=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod form;
mod helpers;
mod path;
mod render;
mod repeatable;
mod schema;
