use super::CifError;
use super::lexer::{Spanned, Token, line_at, tokenize};
use super::table::{Container, Table};

fn split_data_name(name: &str) -> Option<(&str, &str)> {
    let name = name.strip_prefix('_')?;
    let (category, item) = name.split_once('.')?;
    if category.is_empty() || item.is_empty() {
        return None;
    }
    Some((category, item))
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Spanned<'a>>,
    pos: usize,
    containers: Vec<Container>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Result<Self, CifError> {
        Ok(Self {
            input,
            tokens: tokenize(input)?,
            pos: 0,
            containers: Vec::new(),
        })
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> CifError {
        CifError::Parse {
            line: line_at(self.input, offset),
            message: message.into(),
        }
    }

    fn current_container(&mut self, offset: usize) -> Result<&mut Container, CifError> {
        if self.containers.is_empty() {
            return Err(self.error(offset, "data item found before any data_ block"));
        }
        let last = self.containers.len() - 1;
        Ok(&mut self.containers[last])
    }

    fn parse(mut self) -> Result<Vec<Container>, CifError> {
        while self.pos < self.tokens.len() {
            let Spanned { token, offset } = self.tokens[self.pos].clone();
            self.pos += 1;
            match token {
                Token::DataBlock(name) => self.containers.push(Container::new(name)),
                Token::Loop => self.parse_loop(offset)?,
                Token::DataName(name) => self.parse_item(name, offset)?,
                Token::Value(_) | Token::TextField(_) => {
                    return Err(self.error(offset, "value without a preceding data name"));
                }
            }
        }

        if self.containers.is_empty() {
            return Err(CifError::EmptyFile);
        }
        Ok(self.containers)
    }

    fn parse_item(&mut self, name: &str, offset: usize) -> Result<(), CifError> {
        let (category, item) = split_data_name(name)
            .ok_or_else(|| self.error(offset, format!("malformed data name '{}'", name)))?;

        let value = match self.tokens.get(self.pos) {
            Some(next) if next.token.is_value() => next.token.as_value().unwrap_or_default(),
            _ => return Err(self.error(offset, format!("data name '{}' has no value", name))),
        }
        .to_string();
        self.pos += 1;

        let line = line_at(self.input, offset);
        let container = self.current_container(offset)?;
        match container.get_obj_mut(category) {
            Some(table) if table.row_count() <= 1 => {
                table.push_item(item.to_string(), value);
            }
            Some(_) => {
                return Err(CifError::Parse {
                    line,
                    message: format!("category '{}' is already defined as a loop", category),
                });
            }
            None => {
                let mut table = Table::new(category, Vec::new());
                table.push_item(item.to_string(), value);
                container.push_table(table);
            }
        }
        Ok(())
    }

    fn parse_loop(&mut self, loop_offset: usize) -> Result<(), CifError> {
        let mut category: Option<&str> = None;
        let mut columns = Vec::new();

        while let Some(Spanned {
            token: Token::DataName(name),
            offset,
        }) = self.tokens.get(self.pos).cloned()
        {
            let (cat, item) = split_data_name(name)
                .ok_or_else(|| self.error(offset, format!("malformed data name '{}'", name)))?;
            match category {
                None => category = Some(cat),
                Some(existing) if existing.eq_ignore_ascii_case(cat) => {}
                // A name from another category closes the header.
                Some(_) => break,
            }
            columns.push(item.to_string());
            self.pos += 1;
        }

        let category = category.ok_or_else(|| self.error(loop_offset, "loop_ without columns"))?;

        let mut values = Vec::new();
        while let Some(next) = self.tokens.get(self.pos) {
            match next.token.as_value() {
                Some(v) => values.push(v.to_string()),
                None => break,
            }
            self.pos += 1;
        }

        if values.len() % columns.len() != 0 {
            return Err(self.error(
                loop_offset,
                format!(
                    "loop for '{}' has {} values for {} columns",
                    category,
                    values.len(),
                    columns.len()
                ),
            ));
        }

        let ncols = columns.len();
        let mut table = Table::new(category, columns);
        let mut values = values.into_iter();
        for _ in 0..(values.len() / ncols) {
            table.push_row(values.by_ref().take(ncols));
        }

        let line = line_at(self.input, loop_offset);
        let container = self.current_container(loop_offset)?;
        if container.get_obj(category).is_some() {
            return Err(CifError::Parse {
                line,
                message: format!("category '{}' is defined more than once", category),
            });
        }
        container.push_table(table);
        Ok(())
    }
}

/// Parses mmCIF text into one container per `data_` block.
pub fn parse_str(input: &str) -> Result<Vec<Container>, CifError> {
    Parser::new(input)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"data_TEST
#
_entry.id TEST
#
_struct_asym.id A
_struct_asym.entity_id 1
#
loop_
_ihm_cross_link_restraint.id
_ihm_cross_link_restraint.asym_id_1
_ihm_cross_link_restraint.seq_id_1
_ihm_cross_link_restraint.restraint_type
1 A 5 'upper bound'
2 B 12 'lower bound'
#
"#;

    #[test]
    fn parses_loops_and_single_items() {
        let containers = parse_str(SAMPLE).unwrap();
        assert_eq!(containers.len(), 1);
        let block = &containers[0];
        assert_eq!(block.name(), "TEST");

        let entry = block.get_obj("entry").unwrap();
        assert_eq!(entry.row_count(), 1);
        assert_eq!(entry.get_value("id", 0), Some("TEST"));

        let asym = block.get_obj("struct_asym").unwrap();
        assert_eq!(asym.row_count(), 1);
        assert_eq!(asym.get_value("entity_id", 0), Some("1"));

        let restraints = block.get_obj("ihm_cross_link_restraint").unwrap();
        assert_eq!(restraints.row_count(), 2);
        assert_eq!(restraints.get_value("restraint_type", 1), Some("lower bound"));
    }

    #[test]
    fn multiple_data_blocks_yield_multiple_containers() {
        let containers = parse_str("data_a\n_x.y 1\ndata_b\n_x.y 2\n").unwrap();
        assert_eq!(containers.len(), 2);
        assert_eq!(containers[1].get_obj("x").unwrap().get_value("y", 0), Some("2"));
    }

    #[test]
    fn ragged_loop_is_rejected_with_line_number() {
        let err = parse_str("data_a\nloop_\n_x.a\n_x.b\n1 2 3\n").unwrap_err();
        match err {
            CifError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("3 values for 2 columns"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_document_is_an_error() {
        assert!(matches!(parse_str("# nothing\n"), Err(CifError::EmptyFile)));
    }

    #[test]
    fn data_before_block_is_an_error() {
        assert!(matches!(parse_str("_x.y 1\n"), Err(CifError::Parse { line: 1, .. })));
    }

    #[test]
    fn name_from_another_category_closes_loop_header() {
        let containers = parse_str("data_a\nloop_\n_x.a\n_y.b 1\n").unwrap();
        assert_eq!(containers[0].get_obj("x").unwrap().row_count(), 0);
        assert_eq!(containers[0].get_obj("y").unwrap().get_value("b", 0), Some("1"));
    }

    #[test]
    fn data_name_without_value_is_rejected() {
        assert!(parse_str("data_a\n_x.a\n_x.b 1\n").is_err());
    }

    #[test]
    fn empty_loop_has_zero_rows() {
        let containers = parse_str("data_a\nloop_\n_x.a\n_x.b\n_y.c 1\n").unwrap();
        assert_eq!(containers[0].get_obj("x").unwrap().row_count(), 0);
        let y = containers[0].get_obj("y").unwrap();
        assert_eq!(y.row_count(), 1);
        assert_eq!(y.get_value("c", 0), Some("1"));
    }
}
