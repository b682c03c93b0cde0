//! Line commands typed by the user.

use thiserror::Error;
use vendor_select_lib::listing::Direction;
use vendor_select_lib::listing::Filter;
use vendor_select_lib::model::Value;

pub const HELP: &str = "\
Commands:
  list                          show the current rows
  toggle <id> [<id>...]         select or unselect vendors
  all | none                    select or unselect every visible vendor
  filter <field> <op> [value]   add a filter; ops: = != > >= < <= ~ in null notnull
  filter clear                  remove all filters
  sort <field> [asc|desc]       sort by a field
  sort clear                    restore natural order
  page <n> | page-size <n>      move between pages, change page size
  paging on|off                 toggle server-side paging
  commit                        confirm the selection
  cancel                        abandon the selection
  help                          show this text";

/// Command parse error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}', type 'help' for a list")]
    Unknown(String),
    #[error("missing {0}")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
    #[error("unknown filter operator '{0}'")]
    UnknownOperator(String),
    #[error("expected {expected}, got '{actual}'")]
    Unexpected {
        expected: &'static str,
        actual: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Toggle(Vec<i64>),
    SelectAll,
    SelectNone,
    Filter(Filter),
    ClearFilters,
    Sort(String, Direction),
    ClearSort,
    Page(usize),
    PageSize(usize),
    Paging(bool),
    Commit,
    Cancel,
    Help,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match name.to_lowercase().as_str() {
        "list" | "ls" => Command::List,
        "toggle" | "t" => {
            if args.is_empty() {
                return Err(CommandError::MissingArgument("vendor id"));
            }
            Command::Toggle(args.iter().map(|a| number::<i64>(a)).collect::<Result<_, _>>()?)
        }
        "all" => Command::SelectAll,
        "none" => Command::SelectNone,
        "filter" | "f" => match args.as_slice() {
            ["clear"] => Command::ClearFilters,
            _ => Command::Filter(parse_filter(&args)?),
        },
        "sort" | "s" => match args.as_slice() {
            [] => return Err(CommandError::MissingArgument("sort field")),
            ["clear"] => Command::ClearSort,
            [field] => Command::Sort(field.to_string(), Direction::Asc),
            [field, direction] => Command::Sort(field.to_string(), parse_direction(direction)?),
            [_, _, extra, ..] => {
                return Err(CommandError::Unexpected {
                    expected: "end of line",
                    actual: extra.to_string(),
                });
            }
        },
        "page" | "p" => Command::Page(number(single(&args, "page number")?)?),
        "page-size" => Command::PageSize(number(single(&args, "page size")?)?),
        "paging" => match single(&args, "on or off")? {
            "on" => Command::Paging(true),
            "off" => Command::Paging(false),
            other => {
                return Err(CommandError::Unexpected {
                    expected: "on or off",
                    actual: other.to_string(),
                });
            }
        },
        "commit" | "ok" => Command::Commit,
        "cancel" | "quit" | "q" => Command::Cancel,
        "help" | "?" => Command::Help,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn single<'a>(args: &[&'a str], what: &'static str) -> Result<&'a str, CommandError> {
    match args {
        [] => Err(CommandError::MissingArgument(what)),
        [arg] => Ok(*arg),
        [_, extra, ..] => Err(CommandError::Unexpected {
            expected: "end of line",
            actual: extra.to_string(),
        }),
    }
}

fn number<T: std::str::FromStr>(arg: &str) -> Result<T, CommandError> {
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

fn parse_direction(arg: &str) -> Result<Direction, CommandError> {
    match arg.to_lowercase().as_str() {
        "asc" => Ok(Direction::Asc),
        "desc" => Ok(Direction::Desc),
        _ => Err(CommandError::Unexpected {
            expected: "asc or desc",
            actual: arg.to_string(),
        }),
    }
}

fn parse_filter(args: &[&str]) -> Result<Filter, CommandError> {
    let (field, op, rest) = match args {
        [] => return Err(CommandError::MissingArgument("filter field")),
        [_] => return Err(CommandError::MissingArgument("filter operator")),
        [field, op, rest @ ..] => (*field, *op, rest.join(" ")),
    };

    let value = || {
        if rest.is_empty() {
            Err(CommandError::MissingArgument("filter value"))
        } else {
            Ok(Value::parse(&rest))
        }
    };

    let filter = match op.to_lowercase().as_str() {
        "=" | "==" | "eq" => Filter::eq(field, value()?),
        "!=" | "ne" => Filter::ne(field, value()?),
        ">" | "gt" => Filter::gt(field, value()?),
        ">=" | "ge" => Filter::ge(field, value()?),
        "<" | "lt" => Filter::lt(field, value()?),
        "<=" | "le" => Filter::le(field, value()?),
        "~" | "contains" => {
            value()?;
            Filter::contains(field, rest.clone())
        }
        "in" => {
            value()?;
            Filter::is_in(field, rest.split(',').map(Value::parse))
        }
        "null" => Filter::is_null(field),
        "notnull" => Filter::is_not_null(field),
        other => return Err(CommandError::UnknownOperator(other.to_string())),
    };
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn test_toggle_many() {
        assert_eq!(parse("toggle 1 2 30"), Ok(Some(Command::Toggle(vec![1, 2, 30]))));
        assert_eq!(
            parse("toggle 1 x"),
            Err(CommandError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            parse("toggle"),
            Err(CommandError::MissingArgument("vendor id"))
        );
    }

    #[test]
    fn test_filters() {
        assert_eq!(
            parse("filter name ~ poly maker"),
            Ok(Some(Command::Filter(Filter::contains("name", "poly maker"))))
        );
        assert_eq!(
            parse("filter empty_spool_weight >= 140"),
            Ok(Some(Command::Filter(Filter::ge("empty_spool_weight", 140i64))))
        );
        assert_eq!(
            parse("filter id in 1,2,3"),
            Ok(Some(Command::Filter(Filter::is_in("id", [1i64, 2, 3]))))
        );
        assert_eq!(
            parse("filter comment null"),
            Ok(Some(Command::Filter(Filter::is_null("comment"))))
        );
        assert_eq!(parse("filter clear"), Ok(Some(Command::ClearFilters)));
        assert_eq!(
            parse("filter name like x"),
            Err(CommandError::UnknownOperator("like".to_string()))
        );
        assert_eq!(
            parse("filter name ="),
            Err(CommandError::MissingArgument("filter value"))
        );
    }

    #[test]
    fn test_sort() {
        assert_eq!(
            parse("sort name"),
            Ok(Some(Command::Sort("name".to_string(), Direction::Asc)))
        );
        assert_eq!(
            parse("sort registered DESC"),
            Ok(Some(Command::Sort("registered".to_string(), Direction::Desc)))
        );
        assert!(matches!(
            parse("sort name sideways"),
            Err(CommandError::Unexpected { .. })
        ));
    }

    #[test]
    fn test_paging() {
        assert_eq!(parse("page 3"), Ok(Some(Command::Page(3))));
        assert_eq!(parse("page-size 25"), Ok(Some(Command::PageSize(25))));
        assert_eq!(parse("paging off"), Ok(Some(Command::Paging(false))));
        assert_eq!(
            parse("page"),
            Err(CommandError::MissingArgument("page number"))
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            parse("explode"),
            Err(CommandError::Unknown("explode".to_string()))
        );
    }
}
