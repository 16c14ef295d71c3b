//! Embeddable header generation.
//!
//! Packages compiled artifacts into one self-contained C/C++ header:
//! binary artifacts become static byte arrays plus a size constant,
//! textual artifacts become raw-string literals. Output is deterministic
//! for the same ordered input.

use std::fmt::Write;

use crate::artifact::{CompiledShader, ShaderData};

/// Bytes per line in generated byte arrays.
const BYTES_PER_LINE: usize = 12;

/// Generate a header embedding `artifacts` in input order.
///
/// Artifacts that failed, whose data variant does not match their
/// target's expected kind, or (when `include_binary` is false) are
/// binary, are skipped silently: packaging is a best-effort convenience
/// step downstream of compilation, which already reported its errors.
pub fn generate_header(
    artifacts: &[(&str, &CompiledShader)],
    prefix: &str,
    include_binary: bool,
) -> String {
    let mut header = String::new();

    header.push_str("// Auto-generated shader header\n");
    header.push_str("// Do not edit manually!\n\n");
    header.push_str("#pragma once\n\n");
    let _ = writeln!(header, "#ifndef {prefix}SHADERS_H");
    let _ = writeln!(header, "#define {prefix}SHADERS_H");
    header.push_str("\n#include <cstdint>\n\n");

    for &(name, shader) in artifacts {
        if !shader.success {
            continue;
        }
        match shader.data {
            ShaderData::Words(ref words) => {
                if shader.target.is_binary() && include_binary {
                    write_binary(&mut header, prefix, name, words);
                }
            }
            ShaderData::Source(ref code) => {
                if !shader.target.is_binary() {
                    write_source(&mut header, prefix, name, code);
                }
            }
        }
    }

    let _ = writeln!(header, "#endif // {prefix}SHADERS_H");
    header
}

fn write_binary(header: &mut String, prefix: &str, name: &str, words: &[u32]) {
    let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_ne_bytes()).collect();

    let _ = writeln!(header, "static const unsigned char {prefix}{name}[] = {{");
    for (i, byte) in bytes.iter().enumerate() {
        if i % BYTES_PER_LINE == 0 {
            header.push_str("    ");
        }
        let _ = write!(header, "0x{byte:02x}");
        if i + 1 < bytes.len() {
            header.push_str(", ");
        }
        if (i + 1) % BYTES_PER_LINE == 0 {
            header.push('\n');
        }
    }
    if bytes.len() % BYTES_PER_LINE != 0 {
        header.push('\n');
    }
    header.push_str("};\n");
    let _ = writeln!(
        header,
        "static const size_t {prefix}{name}_Size = {};\n",
        bytes.len()
    );
}

fn write_source(header: &mut String, prefix: &str, name: &str, code: &str) {
    let _ = writeln!(header, "static const char* {prefix}{name} = R\"(");
    header.push_str(code);
    header.push_str(")\";\n\n");
}
