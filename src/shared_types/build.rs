use anyhow::Result;
use crux_core::typegen::TypeGen;
use device_console_core::{
    events::{AuthEvent, ConfigEvent, StatusEvent, UiEvent},
    types::{SessionState, Severity, StatusIndicator},
    App, StorageOperation, StorageOutput, TimerOperation, TimerOutput,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Explicitly register domain event enums to ensure all variants are traced
    gen.register_type::<AuthEvent>()?;
    gen.register_type::<ConfigEvent>()?;
    gen.register_type::<StatusEvent>()?;
    gen.register_type::<UiEvent>()?;

    // Shell-facing operations of the custom commands
    gen.register_type::<TimerOperation>()?;
    gen.register_type::<TimerOutput>()?;
    gen.register_type::<StorageOperation>()?;
    gen.register_type::<StorageOutput>()?;

    // Explicitly register other enums to ensure all variants are traced
    gen.register_type::<SessionState>()?;
    gen.register_type::<Severity>()?;
    gen.register_type::<StatusIndicator>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
