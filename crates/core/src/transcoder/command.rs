use std::path::Path;

use super::error::TranscoderError;

/// Split a transform instruction into argv tokens.
///
/// Tokens are separated by runs of whitespace; single- or double-quoted
/// substrings stay one token with the quotes stripped, so filter expressions
/// like `-vf "scale=1280:720"` survive intact.
pub fn split_instruction(instruction: &str) -> Result<Vec<String>, TranscoderError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for ch in instruction.chars() {
        match quote {
            Some(q) if ch == q => quote = None,
            Some(_) => current.push(ch),
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    in_token = true;
                }
                c if c.is_whitespace() => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if quote.is_some() {
        return Err(TranscoderError::UnterminatedQuote);
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

/// Full argument vector for a transcode run:
/// `-i {input} {instruction tokens...} {output}`.
pub fn build_transcode_args(
    input: &Path,
    instruction: &str,
    output: &Path,
) -> Result<Vec<String>, TranscoderError> {
    let mut args = vec!["-i".to_string(), input.to_string_lossy().to_string()];
    args.extend(split_instruction(instruction)?);
    args.push(output.to_string_lossy().to_string());
    Ok(args)
}
