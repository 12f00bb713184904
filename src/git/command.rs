use crate::git::operation::Operation;
use crate::git::options::{OptionOverlay, OptionValue};

/// Build the argument vector for one invocation of `operation`
///
/// Order: sub-command tokens, positional arguments, overlay defaults in
/// declaration order, then caller options. Defaults precede caller options so
/// a caller flag wins wherever git applies the last occurrence. Only
/// [`OptionValue::Omit`] is dropped; caller tokens are never filtered.
pub fn assemble<O: AsRef<str>, P: AsRef<str>>(
    overlay: &OptionOverlay,
    operation: Operation,
    options: &[O],
    positional: &[P],
) -> Vec<String> {
    let mut args: Vec<String> = operation
        .subcommand()
        .iter()
        .map(|token| token.to_string())
        .collect();

    args.extend(positional.iter().map(|arg| arg.as_ref().to_string()));

    if let Some(defaults) = overlay.defaults_for(operation) {
        args.extend(
            defaults
                .values()
                .filter_map(OptionValue::as_arg)
                .map(str::to_string),
        );
    }

    args.extend(options.iter().map(|opt| opt.as_ref().to_string()));
    args
}
