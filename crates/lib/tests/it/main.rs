/*! Integration tests for fauna-wire.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - value: Tests for the Value tree, accessors and conversions
 * - wire: Tests for parsing and serializing extended JSON
 * - mapper: Tests for Encode/Decode and `#[derive(Record)]`
 * - path: Tests for FieldPath construction and resolution
 * - stream: Tests for stream envelope classification
 * - end_to_end: Full parse/decode/encode/write cycles on a reference document
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("fauna_wire=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod end_to_end;
mod helpers;
mod path;
mod stream;
mod wire;
