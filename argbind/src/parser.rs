//! Parse engine binding command-line tokens to a configuration type

use tracing::{debug, trace};

use crate::{
    coerce::split_list,
    errors::{ArgsResult, CoercionError, ConfigurationError, UserInputError},
    logging::{Logger, TracingLogger},
    schema::{ArgumentSchema, Arguments, ParamKind, ParamSpec, ParameterDescriptor},
    table::{HELP_INDEX, SchemaTable},
    token::{HELP_TOKEN, ParamToken, is_param, parse_param},
    usage::{process_name, render_usage},
};

/// Result of a parse that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<T> {
    /// Every token was bound and every required parameter was present
    Parsed(T),
    /// `/?`, `-h` or `--help` was given; parsing stopped there
    HelpRequested,
}

impl<T> ParseOutcome<T> {
    /// The bound configuration, if parsing completed
    #[must_use]
    pub fn parsed(self) -> Option<T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::HelpRequested => None,
        }
    }

    /// Whether help was requested
    #[must_use]
    pub fn is_help_requested(&self) -> bool {
        matches!(self, Self::HelpRequested)
    }
}

/// A failed session: the error plus the field being initialized, if any
struct Failure {
    error: UserInputError,
    field: Option<String>,
}

impl From<UserInputError> for Failure {
    fn from(error: UserInputError) -> Self {
        Self { error, field: None }
    }
}

fn field_failure(spec: &ParamSpec, err: CoercionError) -> Failure {
    debug!(field = %spec.field, error = %err, "field initialization failed");
    Failure {
        error: err.into(),
        field: Some(spec.field.clone()),
    }
}

/// State of a single parse call
///
/// The cursor is the index of the next unread token; reading advances it and
/// rewinding steps it back by one. Seen flags are per session, so a table can
/// be reused across calls.
struct ParseSession<'a, T, S> {
    tokens: &'a [S],
    cursor: usize,
    table: &'a SchemaTable<T>,
    seen: Vec<bool>,
    target: T,
}

impl<'a, T: Default, S: AsRef<str>> ParseSession<'a, T, S> {
    fn new(tokens: &'a [S], table: &'a SchemaTable<T>) -> Self {
        Self {
            tokens,
            cursor: 0,
            table,
            seen: vec![false; table.descriptors().len()],
            target: T::default(),
        }
    }

    fn next_token(&mut self) -> Option<&'a str> {
        let tokens = self.tokens;
        let token = tokens.get(self.cursor)?.as_ref();
        self.cursor += 1;
        Some(token)
    }

    fn rewind(&mut self) {
        self.cursor -= 1;
    }

    fn run(mut self) -> Result<ParseOutcome<T>, Failure> {
        while let Some(token) = self.next_token() {
            if token == HELP_TOKEN {
                debug!(token, "help requested");
                return Ok(ParseOutcome::HelpRequested);
            }

            let Some((param, index)) = parse_param(token)
                .and_then(|param| self.table.lookup(param.key).map(|index| (param, index)))
            else {
                return Err(UserInputError::UnrecognizedParameter(token.to_string()).into());
            };

            if index == HELP_INDEX {
                debug!(token, "help requested");
                return Ok(ParseOutcome::HelpRequested);
            }

            if self.seen[index] {
                return Err(UserInputError::DuplicateParameter {
                    key: param.key.to_string(),
                    value: param.value.unwrap_or_default().to_string(),
                }
                .into());
            }
            self.seen[index] = true;

            trace!(key = param.key, index, "matched parameter");
            self.bind(index, param)?;
        }

        self.apply_defaults()?;
        Ok(ParseOutcome::Parsed(self.target))
    }

    fn bind(&mut self, index: usize, param: ParamToken<'a>) -> Result<(), Failure> {
        let table = self.table;
        let Some(descriptor) = table.descriptor(index) else {
            return Err(UserInputError::UnrecognizedParameter(param.key.to_string()).into());
        };
        let spec = descriptor.spec();
        let Some(access) = descriptor.access() else {
            return Ok(());
        };

        let bound = match spec.kind {
            ParamKind::Flag => {
                let literal = param.inline_value().unwrap_or("true");
                access.set_literal(&mut self.target, literal)
            }
            ParamKind::Single => {
                let literal = match param.inline_value() {
                    Some(value) => value,
                    None => self.take_value(param.key)?,
                };
                access.set_literal(&mut self.target, literal)
            }
            ParamKind::Array => {
                let literals = match param.inline_value() {
                    Some(value) => split_list(value),
                    None => self.take_values(param.key)?,
                };
                access.set_literals(&mut self.target, &literals)
            }
        };
        bound.map_err(|err| field_failure(spec, err))
    }

    /// Consume the next token as a value, unless it looks like a parameter
    fn take_value(&mut self, key: &str) -> Result<&'a str, UserInputError> {
        match self.next_token() {
            Some(token) if !looks_like_param(token) => Ok(token),
            Some(_) => {
                self.rewind();
                Err(UserInputError::MissingValue(key.to_string()))
            }
            None => Err(UserInputError::MissingValue(key.to_string())),
        }
    }

    /// Consume tokens as values up to the next parameter-looking token
    fn take_values(&mut self, key: &str) -> Result<Vec<String>, UserInputError> {
        let mut values = Vec::new();
        while let Some(token) = self.next_token() {
            if looks_like_param(token) {
                self.rewind();
                break;
            }
            values.push(token.to_string());
        }

        if values.is_empty() {
            return Err(UserInputError::NoValues(key.to_string()));
        }
        Ok(values)
    }

    /// Check required parameters and bind defaults, in declaration order
    fn apply_defaults(&mut self) -> Result<(), Failure> {
        let table = self.table;
        for (index, descriptor) in table.descriptors().iter().enumerate() {
            if self.seen[index] || descriptor.is_help() {
                continue;
            }
            let spec = descriptor.spec();
            if !spec.optional {
                return Err(UserInputError::MissingRequiredParameter(spec.name()).into());
            }
            if let Some(default) = spec.default.as_deref() {
                debug!(parameter = %spec.name(), default, "applying default");
                bind_default(descriptor, &mut self.target, default)
                    .map_err(|err| field_failure(spec, err))?;
            }
        }
        Ok(())
    }
}

fn bind_default<T>(
    descriptor: &ParameterDescriptor<T>,
    target: &mut T,
    literal: &str,
) -> Result<(), CoercionError> {
    let Some(access) = descriptor.access() else {
        return Ok(());
    };
    match descriptor.spec().kind {
        ParamKind::Flag | ParamKind::Single => access.set_literal(target, literal),
        ParamKind::Array => access.set_literals(target, &split_list(literal)),
    }
}

/// `/?` never counts as a value
fn looks_like_param(token: &str) -> bool {
    token == HELP_TOKEN || is_param(token)
}

/// Parse tokens against a prepared schema table
///
/// # Errors
///
/// Returns the first [`UserInputError`] encountered; nothing is bound in that
/// case.
pub fn parse_with_table<T, S>(
    table: &SchemaTable<T>,
    args: &[S],
) -> Result<ParseOutcome<T>, UserInputError>
where
    T: Default,
    S: AsRef<str>,
{
    ParseSession::new(args, table)
        .run()
        .map_err(|failure| failure.error)
}

/// Parse and report a failure to `logger`: the field being initialized on the
/// info channel, then the error itself once on the error channel
fn parse_reporting<T, S, L>(
    table: &SchemaTable<T>,
    args: &[S],
    logger: &L,
) -> Option<ParseOutcome<T>>
where
    T: Default,
    S: AsRef<str>,
    L: Logger,
{
    match ParseSession::new(args, table).run() {
        Ok(outcome) => Some(outcome),
        Err(Failure { error, field }) => {
            if let Some(field) = field {
                logger.log_info(&format!("Failed to initialize '{field}': {error}"));
            }
            logger.log_error(&error.to_string());
            None
        }
    }
}

/// Parse tokens into a configuration type
///
/// The schema is extracted and validated on every call.
///
/// # Errors
///
/// Returns a configuration error if the type's schema is invalid, otherwise
/// the first user input error.
///
/// # Examples
///
/// ```
/// use argbind::{Arguments, FieldAccess, ParamSpec, ParseOutcome, SchemaBuilder, try_parse};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Config { input: String, retries: u32 }
///
/// impl Arguments for Config {
///     fn declare() -> SchemaBuilder<Self> {
///         SchemaBuilder::new()
///             .param(
///                 ParamSpec::single().short("i").long("input").field("input"),
///                 FieldAccess::scalar(|c: &mut Config| &mut c.input),
///             )
///             .param(
///                 ParamSpec::single().short("r").default_value("3").field("retries"),
///                 FieldAccess::scalar(|c: &mut Config| &mut c.retries),
///             )
///     }
/// }
///
/// let outcome = try_parse::<Config, _>(&["--input", "data.txt"])?;
/// assert_eq!(
///     outcome,
///     ParseOutcome::Parsed(Config { input: "data.txt".into(), retries: 3 })
/// );
/// # Ok::<(), argbind::ArgsError>(())
/// ```
pub fn try_parse<T, S>(args: &[S]) -> ArgsResult<ParseOutcome<T>>
where
    T: Arguments,
    S: AsRef<str>,
{
    let table = SchemaTable::build(T::schema()?)?;
    Ok(parse_with_table(&table, args)?)
}

/// Binds command-line arguments to `T`, reporting failures to a [`Logger`]
///
/// # Examples
///
/// ```
/// use argbind::{ArgumentParser, Arguments, FieldAccess, ParamSpec, SchemaBuilder};
/// use argbind::logging::MemoryLogger;
///
/// #[derive(Debug, Default)]
/// struct Config { verbose: bool }
///
/// impl Arguments for Config {
///     fn declare() -> SchemaBuilder<Self> {
///         SchemaBuilder::new().param(
///             ParamSpec::flag().short("v").optional().field("verbose"),
///             FieldAccess::scalar(|c: &mut Config| &mut c.verbose),
///         )
///     }
/// }
///
/// let logger = MemoryLogger::new();
/// let mut parser = ArgumentParser::<Config>::new()?.with_logger(&logger);
///
/// assert!(parser.parse(&["-v"]).unwrap().verbose);
/// assert!(parser.parse(&["-x"]).is_none());
/// assert_eq!(logger.errors(), vec!["Error: Unrecognized parameter '-x'."]);
///
/// assert!(parser.parse(&["/?"]).is_none());
/// assert!(parser.help_requested());
/// # Ok::<(), argbind::ConfigurationError>(())
/// ```
#[derive(Debug)]
pub struct ArgumentParser<T, L = TracingLogger> {
    table: SchemaTable<T>,
    logger: L,
    process_name: Option<String>,
    help_requested: bool,
}

impl<T: Arguments> ArgumentParser<T> {
    /// Extract and validate the schema of `T`
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] in the schema.
    pub fn new() -> Result<Self, ConfigurationError> {
        Self::from_schema(T::schema()?)
    }
}

impl<T> ArgumentParser<T> {
    /// Build a parser from an explicit schema
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateKey`] when keys collide.
    pub fn from_schema(schema: ArgumentSchema<T>) -> Result<Self, ConfigurationError> {
        let table = SchemaTable::build(schema)?;
        debug!(keys = table.key_count(), "schema table built");
        Ok(Self {
            table,
            logger: TracingLogger,
            process_name: None,
            help_requested: false,
        })
    }
}

impl<T, L: Logger> ArgumentParser<T, L> {
    /// Send failures to another logger
    #[must_use]
    pub fn with_logger<M: Logger>(self, logger: M) -> ArgumentParser<T, M> {
        ArgumentParser {
            table: self.table,
            logger,
            process_name: self.process_name,
            help_requested: self.help_requested,
        }
    }

    /// Override the process name shown in the usage text
    #[must_use]
    pub fn with_process_name(mut self, name: impl Into<String>) -> Self {
        self.process_name = Some(name.into());
        self
    }

    /// The schema table
    #[must_use]
    pub fn table(&self) -> &SchemaTable<T> {
        &self.table
    }

    /// The logger receiving failures
    #[must_use]
    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Whether the last call to [`ArgumentParser::parse`] stopped for help
    #[must_use]
    pub fn help_requested(&self) -> bool {
        self.help_requested
    }

    /// Render the usage text
    #[must_use]
    pub fn usage(&self) -> String {
        match &self.process_name {
            Some(name) => render_usage(name, &self.table),
            None => render_usage(&process_name(), &self.table),
        }
    }

    /// Write the usage text to stdout
    pub fn print_usage(&self) {
        print!("{}", self.usage());
    }
}

impl<T: Default, L: Logger> ArgumentParser<T, L> {
    /// Parse without logging
    ///
    /// # Errors
    ///
    /// Returns the first [`UserInputError`] encountered.
    pub fn try_parse<S: AsRef<str>>(&self, args: &[S]) -> Result<ParseOutcome<T>, UserInputError> {
        parse_with_table(&self.table, args)
    }

    /// Parse, sending any failure to the logger's error channel
    ///
    /// Returns `None` when parsing failed or help was requested; check
    /// [`ArgumentParser::help_requested`] to tell them apart.
    pub fn parse<S: AsRef<str>>(&mut self, args: &[S]) -> Option<T> {
        self.help_requested = false;
        match parse_reporting(&self.table, args, &self.logger)? {
            ParseOutcome::Parsed(value) => Some(value),
            ParseOutcome::HelpRequested => {
                self.help_requested = true;
                None
            }
        }
    }

    /// Parse the process arguments, skipping the program name
    pub fn parse_env(&mut self) -> Option<T> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        self.parse(&args)
    }
}

/// Parse tokens into `T`, logging any failure through `logger`
///
/// A schema defect is logged like any other failure.
pub fn parse_logged<T, S, L>(args: &[S], logger: L) -> Option<T>
where
    T: Arguments,
    S: AsRef<str>,
    L: Logger,
{
    match ArgumentParser::<T>::new() {
        Ok(parser) => parser.with_logger(logger).parse(args),
        Err(err) => {
            logger.log_error(&err.to_string());
            None
        }
    }
}

/// Render the usage text of `T` under the given process name
///
/// # Errors
///
/// Returns the first [`ConfigurationError`] in the schema.
pub fn usage<T: Arguments>(process_name: &str) -> Result<String, ConfigurationError> {
    let table = SchemaTable::build(T::schema()?)?;
    Ok(render_usage(process_name, &table))
}
