//! Property-based test modules

mod classification_tests;
mod freerdp_tests;
