//! Pipeline orchestration: compose the front end and back ends, and pick
//! a target dialect from a device's capability set.

use crate::artifact::{CompiledShader, ShaderData};
use crate::backend;
use crate::capability::{self, Support};
use crate::error::TranslateError;
use crate::frontend;
use crate::options::{CompileOptions, ShaderStage, TargetLanguage};

/// Compile GLSL source directly to `target`.
///
/// Front end first; unless the target is SPIR-V itself, the intermediate
/// words are then handed to the matching back end. A front-end failure is
/// returned immediately with its target field overwritten to the
/// requested target, so callers report the artifact they asked for.
pub fn compile(
    source: &str,
    stage: ShaderStage,
    target: TargetLanguage,
    options: &CompileOptions,
) -> CompiledShader {
    let mut spirv = frontend::compile_to_spirv(source, stage, options);
    if !spirv.success {
        spirv.target = target;
        return spirv;
    }

    if target == TargetLanguage::Spirv {
        return spirv;
    }

    match spirv.data {
        ShaderData::Words(ref words) => backend::cross_compile(words, stage, target, options),
        // The front end only ever produces words; anything else is a bug.
        ShaderData::Source(_) => CompiledShader::failure(
            TranslateError::Lowering("front end produced non-binary data".into()),
            stage,
            target,
        ),
    }
}

/// Pick the best-supported target dialect from a capability set.
///
/// Families are evaluated in a fixed priority order reflecting how
/// directly each maps onto native pipeline creation: SPIR-V needs no
/// further translation, the textual dialects need driver compilation.
/// Returns the chosen target with its negotiated version (in the
/// capability code's units; see
/// [`CompileOptions::apply_negotiated_version`]).
pub fn select_target(capabilities: &[u32]) -> Result<(TargetLanguage, u32), TranslateError> {
    const PRIORITY: [TargetLanguage; 5] = [
        TargetLanguage::Spirv,
        TargetLanguage::Metal,
        TargetLanguage::Hlsl,
        TargetLanguage::Glsl,
        TargetLanguage::GlslEs,
    ];

    for target in PRIORITY {
        let Support { supported, version } = capability::classify(capabilities, target);
        if supported {
            log::debug!("selected target {target} (capability version {version})");
            return Ok((target, version));
        }
    }
    Err(TranslateError::UnsupportedTarget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{ESSL_300, GLSL_450, HLSL_5_0, METAL_2_1, SPIRV_100};

    #[test]
    fn test_select_prefers_spirv() {
        let caps = [ESSL_300, GLSL_450, HLSL_5_0, METAL_2_1, SPIRV_100];
        let (target, version) = select_target(&caps).unwrap();
        assert_eq!(target, TargetLanguage::Spirv);
        assert_eq!(version, 100);
    }

    #[test]
    fn test_select_metal_over_textual_dialects() {
        let caps = [GLSL_450, METAL_2_1, ESSL_300];
        let (target, version) = select_target(&caps).unwrap();
        assert_eq!(target, TargetLanguage::Metal);
        assert_eq!(version, 201);
    }

    #[test]
    fn test_select_es_only_device() {
        let (target, version) = select_target(&[ESSL_300]).unwrap();
        assert_eq!(target, TargetLanguage::GlslEs);
        assert_eq!(version, 300);
    }

    #[test]
    fn test_select_empty_set_is_unsupported() {
        assert_eq!(select_target(&[]), Err(TranslateError::UnsupportedTarget));
    }
}
