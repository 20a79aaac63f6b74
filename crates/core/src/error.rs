use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("At least one option is required.")]
    NoOptionsDefined,

    #[error("`help` is a reserved option key and cannot be declared in any group.")]
    ReservedKey,

    #[error("Option key `{}` is declared in more than one group.", _0)]
    DuplicateKey(String),

    #[error("A question is required for option `{}`.", _0)]
    MissingQuestion(String),

    #[error("A non-empty choice list is required for option `{}`.", _0)]
    EmptyChoices(String),

    #[error(
        "`{}` cannot have `{}` as value; it opens the later-declared option `{}`. \
         Either pass `{}` in the last position, or mark it as not required and omit it.",
        .name, .value, .conflicts_with, .name
    )]
    AmbiguousNamedValue {
        name: String,
        value: String,
        conflicts_with: String,
    },

    #[error(
        "At least one positional or named option is required. \
         Run the command with `help` for more information about options."
    )]
    MissingRequiredArguments,

    #[error("Error parsing the package-manager argument payload: {}", _0)]
    ArgvPayload(#[from] serde_json::Error),

    #[error("STDIO error: {}", _0)]
    Stdio(#[from] std::io::Error),
}
