mod common;
mod overrides;
mod tax;
