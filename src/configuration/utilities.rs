use std::{env, io, path::PathBuf};


/// Returns the default configuration filepath, which is at
/// `{current directory}/configs/relay.toml`.
pub fn get_default_configuration_file_path() -> io::Result<PathBuf> {
    let mut configuration_filepath = env::current_dir()?;
    configuration_filepath.push("configs/relay.toml");

    Ok(configuration_filepath)
}


/// Substitutes `${NAME}` and `$NAME` references with values from the process environment.
///
/// References to unset variables are left in the text as they were.
#[must_use = "function returns the expanded text"]
pub fn expand_environment_variables(text: &str) -> String {
    expand_environment_variables_with(text, |name| env::var(name).ok())
}

/// Same as [`expand_environment_variables`], but looks variables up through `lookup`.
#[must_use = "function returns the expanded text"]
pub fn expand_environment_variables_with<F>(text: &str, mut lookup: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut expanded = String::with_capacity(text.len());
    let mut remaining = text;

    while let Some(dollar_index) = remaining.find('$') {
        expanded.push_str(&remaining[..dollar_index]);
        let after_dollar = &remaining[dollar_index + 1..];

        match parse_variable_reference(after_dollar) {
            Some((name, consumed)) => {
                match lookup(name) {
                    Some(value) => expanded.push_str(&value),
                    None => {
                        expanded.push('$');
                        expanded.push_str(&after_dollar[..consumed]);
                    }
                }

                remaining = &after_dollar[consumed..];
            }
            None => {
                expanded.push('$');
                remaining = after_dollar;
            }
        }
    }

    expanded.push_str(remaining);
    expanded
}

/// Parses the part of a reference after the `$`.
/// Returns the variable name and how many bytes the reference spans.
fn parse_variable_reference(after_dollar: &str) -> Option<(&str, usize)> {
    if let Some(braced) = after_dollar.strip_prefix('{') {
        let closing_index = braced.find('}')?;
        let name = &braced[..closing_index];

        if name.is_empty() || !name.chars().all(is_variable_name_character) {
            return None;
        }

        return Some((name, closing_index + 2));
    }

    let name_length = after_dollar
        .find(|character: char| !is_variable_name_character(character))
        .unwrap_or(after_dollar.len());

    if name_length == 0 {
        return None;
    }

    Some((&after_dollar[..name_length], name_length))
}

#[inline]
fn is_variable_name_character(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_'
}
