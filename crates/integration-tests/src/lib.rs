//! Integration tests for Hisaab.
//!
//! The tests live in `tests/`:
//! - `mapping_pipeline` - full local pipeline (validate, map, sanitize),
//!   no network required
//! - `fbr_sandbox` - live validate/post against the FBR sandbox; ignored
//!   unless sandbox credentials are configured
