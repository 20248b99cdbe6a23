//! Textual assignment dump.
//!
//! One line per client, `client_id count resource_ids...`, where `count` is
//! 0 for an unassigned client and 1 otherwise:
//!
//! ```text
//! S1 1 W1
//! S2 1 W2
//! S3 0
//! ```
//!
//! Trailing report lines such as `Cost: 27` are ignored when reading.

use std::fmt;

use super::assignment::Assignment;
use super::instance::Instance;
use crate::error::{AllocError, Result};

impl fmt::Display for Assignment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instance = self.instance();
        for (client, resource) in self.assignments().iter().enumerate() {
            let code = instance.client(client).code();
            match resource {
                Some(r) => writeln!(f, "{} 1 {}", code, instance.resource(*r).code())?,
                None => writeln!(f, "{} 0", code)?,
            }
        }
        Ok(())
    }
}

impl<'a> Assignment<'a> {
    /// Rebuilds an assignment from its dump.
    ///
    /// Clients missing from the text stay unassigned.
    ///
    /// # Errors
    ///
    /// Returns [`AllocError::Parse`] for unknown client or resource ids, a
    /// malformed count, a client listed with more than one resource, or a
    /// client listed twice.
    pub fn read_from(instance: &'a Instance, text: &str) -> Result<Self> {
        let mut state = Assignment::new(instance);
        let mut seen = vec![false; instance.client_count()];

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let mut tokens = line.split_whitespace();
            let Some(code) = tokens.next() else {
                continue;
            };
            if code.ends_with(':') {
                continue;
            }

            let client = instance
                .client_index(code)
                .ok_or_else(|| parse_error(line_no, format!("unknown client {}", code)))?;
            if std::mem::replace(&mut seen[client], true) {
                return Err(parse_error(line_no, format!("client {} listed twice", code)));
            }

            let count: usize = tokens
                .next()
                .ok_or_else(|| parse_error(line_no, "missing resource count"))?
                .parse()
                .map_err(|_| parse_error(line_no, "resource count is not a number"))?;
            let resources: Vec<&str> = tokens.collect();
            if resources.len() != count {
                return Err(parse_error(
                    line_no,
                    format!("expected {} resource ids, found {}", count, resources.len()),
                ));
            }

            match resources.as_slice() {
                [] => {}
                [resource_code] => {
                    let resource = instance.resource_index(resource_code).ok_or_else(|| {
                        parse_error(line_no, format!("unknown resource {}", resource_code))
                    })?;
                    state.assign(client, resource);
                }
                _ => {
                    return Err(parse_error(
                        line_no,
                        format!("client {} assigned to {} resources", code, count),
                    ))
                }
            }
        }

        Ok(state)
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> AllocError {
    AllocError::Parse {
        line,
        message: message.into(),
    }
}
