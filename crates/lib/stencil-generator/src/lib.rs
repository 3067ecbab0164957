pub mod config;
pub mod error;
pub mod paths;
pub mod pipeline;
pub mod prelude;
pub mod prompt;
pub mod slug;
pub mod source;
pub mod template;
pub mod toolchain;
pub mod workspace;
pub mod writer;
