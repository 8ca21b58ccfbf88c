/// Byte-array rendering of bytecode for static embedding in C/C++ headers

const MAX_LINE_LENGTH: usize = 128;

/// Render `bytes` as a `const uint8_t <name>[]` initializer
///
/// The defines the shader was compiled with are kept in a leading comment.
/// Lines wrap once they exceed 128 characters; the first byte always starts
/// a new indented line.
///
/// ```
/// use galaxy_3d_shader::galaxy3d::dump::format_byte_array;
///
/// let text = format_byte_array("g_Lit_ps", "FOG=1", &[3, 42, 255]);
/// assert_eq!(text, "// {FOG=1}\nconst uint8_t g_Lit_ps[] = {\n    3,42,255,\n};\n");
/// ```
pub fn format_byte_array(name: &str, combined_defines: &str, bytes: &[u8]) -> String {
    let mut out = String::with_capacity(64 + bytes.len() * 4);
    out.push_str(&format!("// {{{}}}\nconst uint8_t {}[] = {{", combined_defines, name));

    let mut line_length = MAX_LINE_LENGTH + 1;
    for &value in bytes {
        if line_length > MAX_LINE_LENGTH {
            out.push_str("\n    ");
            line_length = 0;
        }
        out.push_str(&format!("{},", value));
        line_length += match value {
            0..=9 => 3,
            10..=99 => 4,
            _ => 5,
        };
    }

    out.push_str("\n};\n");
    out
}
