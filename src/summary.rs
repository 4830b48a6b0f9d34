use std::io::Write;

/// Write errors (a closed pipe, say) are ignored.
pub fn report(lines: &[String]) {
    let _ = write_report(&mut std::io::stdout().lock(), lines);
}

pub fn write_report<W: Write>(out: &mut W, lines: &[String]) -> std::io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
