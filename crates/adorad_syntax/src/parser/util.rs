/// Small shared parsing helpers and token-to-operator tables.
impl<'a> Parser<'a> {
    fn identifier(&mut self) -> Result<String, ParseError> {
        let token = self.current();
        if token.is_identifier() {
            self.advance();
            Ok(token.text.clone())
        } else {
            Err(self.unexpected(Expected::Identifier))
        }
    }

    /// `a.b.c`
    fn dotted_path(&mut self) -> Result<Vec<String>, ParseError> {
        let mut path = vec![self.identifier()?];
        while self.advance_if(TokenKind::Dot).is_some() {
            path.push(self.identifier()?);
        }
        Ok(path)
    }

    /// `expr, expr, ... close` with an optional trailing comma. Consumes `close`.
    fn expression_list(&mut self, close: TokenKind) -> Result<Vec<AstNode>, ParseError> {
        let mut list = Vec::new();
        while !self.check(close) {
            list.push(self.expression()?);
            if self.advance_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(close)?;
        Ok(list)
    }
}

fn assign_op(kind: TokenKind) -> Option<AssignOp> {
    Some(match kind {
        TokenKind::Equals => AssignOp::Assign,
        TokenKind::PlusEquals => AssignOp::Add,
        TokenKind::MinusEquals => AssignOp::Sub,
        TokenKind::MultEquals => AssignOp::Mul,
        TokenKind::SlashEquals => AssignOp::Div,
        TokenKind::ModEquals => AssignOp::Mod,
        TokenKind::AndEquals => AssignOp::BitAnd,
        TokenKind::OrEquals => AssignOp::BitOr,
        TokenKind::XorEquals => AssignOp::BitXor,
        TokenKind::LbitshiftEquals => AssignOp::Shl,
        TokenKind::RbitshiftEquals => AssignOp::Shr,
        _ => return None,
    })
}

fn comparison_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::GreaterThan => BinaryOp::Gt,
        TokenKind::LessThan => BinaryOp::Lt,
        TokenKind::GreaterThanOrEqualTo => BinaryOp::GtEq,
        TokenKind::LessThanOrEqualTo => BinaryOp::LtEq,
        TokenKind::EqualsEquals => BinaryOp::Eq,
        TokenKind::ExclamationEquals => BinaryOp::NotEq,
        TokenKind::In => BinaryOp::In,
        TokenKind::NotIn => BinaryOp::NotIn,
        _ => return None,
    })
}

fn prefix_op(kind: TokenKind) -> Option<PrefixOp> {
    Some(match kind {
        TokenKind::Not => PrefixOp::BoolNot,
        TokenKind::Exclamation => PrefixOp::Negation,
        TokenKind::Minus => PrefixOp::Minus,
        TokenKind::And => PrefixOp::AddrOf,
        TokenKind::Question => PrefixOp::Optional,
        TokenKind::Try => PrefixOp::Try,
        _ => return None,
    })
}

/// Literal text without its `r`/`f`/`b` prefix and surrounding quotes.
fn unquote(text: &str) -> String {
    let body = text
        .strip_prefix(['r', 'f', 'b'])
        .filter(|rest| rest.starts_with(['"', '\'']))
        .unwrap_or(text);
    for quote in ["\"\"\"", "\"", "'"] {
        if let Some(inner) = body.strip_prefix(quote).and_then(|s| s.strip_suffix(quote)) {
            return inner.to_string();
        }
    }
    body.to_string()
}

fn strip_number_suffix(text: &str, suffix: &str) -> String {
    text.strip_suffix(suffix).unwrap_or(text).to_string()
}
