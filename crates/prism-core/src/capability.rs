//! Capability codes reported by a graphics backend.
//!
//! Each code bit-packs a dialect-family tag in its high bits and a
//! version number in the low 16 bits. A device reports an ordered list of
//! these; the core never queries a device itself.

use crate::options::TargetLanguage;

/// Low bits of a capability code holding the dialect version.
pub const VERSION_BITMASK: u32 = 0x0000_ffff;

const FAMILY_GLSL: u32 = 0x0001_0000;
const FAMILY_ESSL: u32 = 0x0002_0000;
const FAMILY_SPIRV: u32 = 0x0004_0000;
const FAMILY_HLSL: u32 = 0x0008_0000;
const FAMILY_METAL: u32 = 0x0010_0000;

// Common capability codes. Version units are per-family: GLSL/ESSL carry
// the #version number, HLSL carries the shader model times 100, Metal
// carries major*100 + minor.
pub const GLSL_410: u32 = FAMILY_GLSL | 410;
pub const GLSL_450: u32 = FAMILY_GLSL | 450;
pub const ESSL_300: u32 = FAMILY_ESSL | 300;
pub const ESSL_310: u32 = FAMILY_ESSL | 310;
pub const SPIRV_100: u32 = FAMILY_SPIRV | 100;
pub const HLSL_5_0: u32 = FAMILY_HLSL | 500;
pub const HLSL_6_0: u32 = FAMILY_HLSL | 600;
pub const METAL_2_1: u32 = FAMILY_METAL | 201;
pub const METAL_3_0: u32 = FAMILY_METAL | 300;

/// Outcome of scanning a capability set for one dialect family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Support {
    pub supported: bool,
    /// Version from the matching code, 0 when unsupported.
    pub version: u32,
}

fn family_code(target: TargetLanguage) -> u32 {
    match target {
        TargetLanguage::Glsl => FAMILY_GLSL,
        TargetLanguage::GlslEs => FAMILY_ESSL,
        TargetLanguage::Spirv => FAMILY_SPIRV,
        TargetLanguage::Hlsl => FAMILY_HLSL,
        TargetLanguage::Metal => FAMILY_METAL,
    }
}

/// Scan `capabilities` for codes in `target`'s dialect family.
///
/// Masks the version bits out of each code and compares the remainder
/// against the family tag; unrecognized codes are ignored. When several
/// codes match, the highest version wins. Pure function of its inputs.
pub fn classify(capabilities: &[u32], target: TargetLanguage) -> Support {
    let family = family_code(target);
    let mut version = None;

    for &code in capabilities {
        if code & !VERSION_BITMASK == family {
            let v = code & VERSION_BITMASK;
            version = Some(version.map_or(v, |best: u32| best.max(v)));
        }
    }

    match version {
        Some(version) => Support {
            supported: true,
            version,
        },
        None => Support {
            supported: false,
            version: 0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_matches_family_and_extracts_version() {
        let caps = [GLSL_410, ESSL_300, SPIRV_100];
        let support = classify(&caps, TargetLanguage::Glsl);
        assert!(support.supported);
        assert_eq!(support.version, 410);
    }

    #[test]
    fn test_classify_unsupported_family() {
        let caps = [GLSL_410];
        let support = classify(&caps, TargetLanguage::Metal);
        assert!(!support.supported);
        assert_eq!(support.version, 0);
    }

    #[test]
    fn test_classify_picks_highest_version() {
        let caps = [GLSL_410, GLSL_450];
        let support = classify(&caps, TargetLanguage::Glsl);
        assert_eq!(support.version, 450);
    }

    #[test]
    fn test_classify_ignores_unknown_codes() {
        // A code whose family bits match none of the five known tags.
        let caps = [0x4000_0000 | 123, METAL_2_1];
        assert!(!classify(&caps, TargetLanguage::Glsl).supported);

        let metal = classify(&caps, TargetLanguage::Metal);
        assert!(metal.supported);
        assert_eq!(metal.version, 201);
    }

    #[test]
    fn test_classify_empty_set() {
        for target in TargetLanguage::ALL {
            assert!(!classify(&[], target).supported);
        }
    }

    #[test]
    fn test_families_are_independently_queryable() {
        let caps = [SPIRV_100, HLSL_5_0, METAL_2_1, GLSL_450, ESSL_310];
        for target in TargetLanguage::ALL {
            assert!(classify(&caps, target).supported);
        }
    }
}
