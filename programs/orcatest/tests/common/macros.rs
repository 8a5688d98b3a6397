//! Test macros for multi-environment testing

/// Run a test in-memory and, when enabled, against a local validator
#[macro_export]
macro_rules! test_all_environments {
    ($name:ident, $test_fn:expr) => {
        mod $name {
            use super::*;

            $crate::test_in_memory!(in_memory, $test_fn);
            $crate::test_localnet!(localnet, $test_fn);
        }
    };
}

/// Run a test only in the in-memory bank
#[macro_export]
macro_rules! test_in_memory {
    ($name:ident, $test_fn:expr) => {
        #[tokio::test]
        async fn $name() {
            use $crate::common::{harness_context, init_test_tracing, programs_available};
            init_test_tracing();
            if !programs_available() {
                return;
            }

            let ctx = harness_context($crate::common::TestEnvironment::in_memory())
                .await
                .expect("Failed to create in-memory test context");

            ($test_fn)(ctx).await.expect("In-memory test failed");
        }
    };
}

/// Run a test only against a local validator
#[macro_export]
macro_rules! test_localnet {
    ($name:ident, $test_fn:expr) => {
        #[tokio::test]
        #[ignore = "Run with RUN_LOCALNET_TESTS=1"]
        async fn $name() {
            use $crate::common::{
                current_test_environment, harness_context, init_test_tracing,
                should_run_localnet_tests,
            };
            init_test_tracing();
            if !should_run_localnet_tests() {
                return;
            }

            let ctx = harness_context(current_test_environment())
                .await
                .expect("Failed to create localnet test context");

            ($test_fn)(ctx).await.expect("Localnet test failed");
        }
    };
}
