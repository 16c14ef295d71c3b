//! Runs in its own test binary: the runtime guard is process-global, so
//! checking the uninitialized path must not share a process with tests
//! that initialize it.

use prism_core::{CompileOptions, ShaderStage, TargetLanguage, TranslateError};

#[test]
fn test_compile_before_initialize_is_rejected() {
    let shader = prism_core::compile(
        "#version 450\nvoid main() { gl_Position = vec4(0.0); }",
        ShaderStage::Vertex,
        TargetLanguage::Glsl,
        &CompileOptions::default(),
    );
    assert!(!shader.success);
    assert_eq!(shader.error, Some(TranslateError::Uninitialized));
    // Failure happened in the front end, but the artifact reports the
    // target the caller asked for.
    assert_eq!(shader.target, TargetLanguage::Glsl);
}
