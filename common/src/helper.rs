/// Formats an error and every error in its `source()` chain, one cause per line.
///
/// Used by the `Debug` implementation of the crate errors so that logs keep
/// the full chain instead of only the outermost message.
pub fn error_chain_fmt(
    error: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", error)?;

    let mut current = error.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }

    Ok(())
}
