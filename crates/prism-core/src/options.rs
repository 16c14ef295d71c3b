//! Shader stages, target languages and compilation options.

use std::fmt;

/// Pipeline stage a shader source is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Compute,
    Geometry,
    TessControl,
    TessEvaluation,
}

impl ShaderStage {
    pub(crate) fn shaderc_kind(self) -> shaderc::ShaderKind {
        match self {
            ShaderStage::Vertex => shaderc::ShaderKind::Vertex,
            ShaderStage::Fragment => shaderc::ShaderKind::Fragment,
            ShaderStage::Compute => shaderc::ShaderKind::Compute,
            ShaderStage::Geometry => shaderc::ShaderKind::Geometry,
            ShaderStage::TessControl => shaderc::ShaderKind::TessControl,
            ShaderStage::TessEvaluation => shaderc::ShaderKind::TessEvaluation,
        }
    }

    /// Stage as understood by the naga back ends. Geometry and tessellation
    /// have no naga equivalent and return `None`.
    pub(crate) fn naga_stage(self) -> Option<naga::ShaderStage> {
        match self {
            ShaderStage::Vertex => Some(naga::ShaderStage::Vertex),
            ShaderStage::Fragment => Some(naga::ShaderStage::Fragment),
            ShaderStage::Compute => Some(naga::ShaderStage::Compute),
            _ => None,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "Vertex",
            ShaderStage::Fragment => "Fragment",
            ShaderStage::Compute => "Compute",
            ShaderStage::Geometry => "Geometry",
            ShaderStage::TessControl => "TessControl",
            ShaderStage::TessEvaluation => "TessEvaluation",
        };
        f.write_str(name)
    }
}

/// Shading language a compile request produces.
///
/// `Spirv` is the intermediate binary form; every other variant is a
/// textual dialect cross-compiled from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    /// SPIR-V binary (the universal intermediate form).
    Spirv,
    /// Desktop OpenGL GLSL.
    Glsl,
    /// OpenGL ES GLSL.
    GlslEs,
    /// Direct3D HLSL.
    Hlsl,
    /// Apple Metal Shading Language.
    Metal,
}

impl TargetLanguage {
    /// All targets, in the order the CLI's `--all` flag compiles them.
    pub const ALL: [TargetLanguage; 5] = [
        TargetLanguage::Spirv,
        TargetLanguage::Glsl,
        TargetLanguage::GlslEs,
        TargetLanguage::Hlsl,
        TargetLanguage::Metal,
    ];

    /// True when the artifact for this target is a binary word stream
    /// rather than source text.
    pub fn is_binary(self) -> bool {
        matches!(self, TargetLanguage::Spirv)
    }

    /// Identifier-safe suffix used when naming embedded artifacts.
    pub fn suffix(self) -> &'static str {
        match self {
            TargetLanguage::Spirv => "SPIRV",
            TargetLanguage::Glsl => "GLSL",
            TargetLanguage::GlslEs => "GLSL_ES",
            TargetLanguage::Hlsl => "HLSL",
            TargetLanguage::Metal => "Metal",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetLanguage::Spirv => "SPIR-V",
            TargetLanguage::Glsl => "GLSL",
            TargetLanguage::GlslEs => "GLSL ES",
            TargetLanguage::Hlsl => "HLSL",
            TargetLanguage::Metal => "Metal",
        };
        f.write_str(name)
    }
}

/// Tunables for compilation and cross-compilation.
///
/// Fields for a dialect that is not being targeted are ignored, never
/// validated, so one options value can be shared across several targets.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Target GLSL version (e.g. 410, 450).
    pub glsl_version: u32,
    /// Emit the ES profile from the desktop GLSL target.
    pub glsl_es: bool,
    /// Target GLSL ES version (e.g. 300, 310).
    pub glsl_es_version: u32,
    /// Allow explicit binding layout qualifiers below GLSL 4.20
    /// (GL_ARB_shading_language_420pack semantics).
    pub enable_420pack: bool,

    /// HLSL shader model times ten (e.g. 50 for SM 5.0).
    pub hlsl_shader_model: u32,

    /// Metal version encoded as major*10000 + minor*100 + patch
    /// (e.g. 20100 for 2.1).
    pub metal_version: u32,
    /// Preserve original binding decorations in Metal argument slots.
    pub metal_decoration_binding: bool,

    /// Validate emitted SPIR-V with an extra IR round trip.
    pub spirv_validate: bool,
    /// Run the front end's optimizer over the SPIR-V output.
    pub spirv_optimize: bool,

    /// Include debug info in the SPIR-V output.
    pub debug_info: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            glsl_version: 410,
            glsl_es: false,
            glsl_es_version: 300,
            enable_420pack: false,
            hlsl_shader_model: 50,
            metal_version: 20100,
            metal_decoration_binding: true,
            spirv_validate: false,
            spirv_optimize: false,
            debug_info: false,
        }
    }
}

impl CompileOptions {
    /// Substitute a version negotiated from a capability code into the
    /// field for `target`'s dialect family.
    ///
    /// Capability codes store versions in each family's own units: HLSL
    /// codes carry 500 for SM 5.0 while [`CompileOptions::hlsl_shader_model`]
    /// holds 50, and Metal codes carry 201 for 2.1 while
    /// [`CompileOptions::metal_version`] holds 20100.
    pub fn apply_negotiated_version(&mut self, target: TargetLanguage, version: u32) {
        match target {
            TargetLanguage::Spirv => {}
            TargetLanguage::Glsl => self.glsl_version = version,
            TargetLanguage::GlslEs => self.glsl_es_version = version,
            TargetLanguage::Hlsl => self.hlsl_shader_model = version / 10,
            TargetLanguage::Metal => {
                self.metal_version = (version / 100) * 10000 + (version % 100) * 100;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_glsl_version() {
        let mut opts = CompileOptions::default();
        opts.apply_negotiated_version(TargetLanguage::Glsl, 450);
        assert_eq!(opts.glsl_version, 450);
    }

    #[test]
    fn test_apply_hlsl_version_scales_to_shader_model() {
        let mut opts = CompileOptions::default();
        opts.apply_negotiated_version(TargetLanguage::Hlsl, 500);
        assert_eq!(opts.hlsl_shader_model, 50);
    }

    #[test]
    fn test_apply_metal_version_repacks() {
        let mut opts = CompileOptions::default();
        opts.apply_negotiated_version(TargetLanguage::Metal, 201);
        assert_eq!(opts.metal_version, 20100);

        opts.apply_negotiated_version(TargetLanguage::Metal, 300);
        assert_eq!(opts.metal_version, 30000);
    }

    #[test]
    fn test_apply_spirv_version_is_a_no_op() {
        let mut opts = CompileOptions::default();
        let before = opts.clone();
        opts.apply_negotiated_version(TargetLanguage::Spirv, 100);
        assert_eq!(opts.glsl_version, before.glsl_version);
        assert_eq!(opts.metal_version, before.metal_version);
    }

    #[test]
    fn test_target_suffixes_are_identifier_safe() {
        for target in TargetLanguage::ALL {
            assert!(
                target
                    .suffix()
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
            );
        }
    }
}
