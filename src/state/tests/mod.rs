mod common;
mod window;
