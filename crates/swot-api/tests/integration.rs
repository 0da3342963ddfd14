//! Single integration test binary; every module below shares `common`.

mod common;
