/// Statement parsing.
///
/// This chunk implements blocks, jump statements (`return`, `raise`, `break`, `continue`), `defer`, and
/// expression/assignment statements.
///
/// ## Notes
/// - Block-like expressions (`if`, `while`, `for`, `match`) are statements on their own and take no trailing `;`.
/// - Errors inside a block are recovered per statement, so one bad line does not hide the rest of the block.
impl<'a> Parser<'a> {
    fn statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.loc();
        match self.peek() {
            TokenKind::LBrace => self.block(),
            TokenKind::Any => self.var_decl(loc, Visibility::Private),
            TokenKind::Const => self.const_decl(loc, Visibility::Private),
            TokenKind::Semicolon => {
                self.advance();
                Ok(AstNode::new(loc, Stmt::Empty))
            }
            TokenKind::Raise => {
                self.advance();
                let value = self.expression()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(AstNode::new(
                    loc,
                    ReturnStmt {
                        kind: ReturnKind::Error,
                        value: Some(Box::new(value)),
                    },
                ))
            }
            TokenKind::Defer => {
                self.advance();
                let body = if self.check(TokenKind::LBrace) {
                    self.block()?
                } else {
                    let expr = self.expression()?;
                    self.expect(TokenKind::Semicolon)?;
                    expr
                };
                Ok(AstNode::new(loc, DeferStmt { body: Box::new(body) }))
            }
            TokenKind::Unreachable => {
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                Ok(AstNode::new(loc, Stmt::Unreachable))
            }
            kind if kind.is_jump_statement() => self.jump_statement(loc, kind),
            kind if kind.is_loop_statement() || kind.is_flow_statement() => self.primary(),
            TokenKind::Eof => Err(self.construct_error(Expected::Statement)),
            _ => self.expression_statement(),
        }
    }

    /// `return expr? ;`, `break expr? ;` or `continue ;`
    fn jump_statement(&mut self, loc: Location, kind: TokenKind) -> Result<AstNode, ParseError> {
        self.advance();
        let value = if kind != TokenKind::Continue && !self.check(TokenKind::Semicolon) {
            Some(Box::new(self.expression()?))
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;

        Ok(match kind {
            TokenKind::Return => AstNode::new(
                loc,
                ReturnStmt {
                    kind: ReturnKind::Ok,
                    value,
                },
            ),
            TokenKind::Continue => AstNode::new(
                loc,
                BranchStmt {
                    kind: BranchKind::Continue,
                    value,
                },
            ),
            _ => AstNode::new(
                loc,
                BranchStmt {
                    kind: BranchKind::Break,
                    value,
                },
            ),
        })
    }

    fn block(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.loc();
        let statements = self.block_statements()?;
        Ok(AstNode::new(loc, Block { statements }))
    }

    /// `{ stmt* }`, returning the statements. Each block is one nesting level.
    fn block_statements(&mut self) -> Result<Vec<AstNode>, ParseError> {
        self.nested(|p| {
            p.expect(TokenKind::LBrace)?;
            let mut statements = Vec::new();
            while !p.check(TokenKind::RBrace) && !p.is_at_end() {
                let start = p.pos;
                match p.statement() {
                    Ok(stmt) => statements.push(stmt),
                    Err(e) => p.recover(e, start)?,
                }
            }
            p.expect(TokenKind::RBrace)?;
            Ok(statements)
        })
    }

    /// `expr ;` or `target, ... op value, ... ;`
    fn expression_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.loc();
        let first = self.expression()?;
        if self.check(TokenKind::Comma) || self.peek().is_assignment_operator() {
            let assignment = self.assignment(loc, first)?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(assignment);
        }
        self.expect(TokenKind::Semicolon)?;
        Ok(first)
    }

    /// The rest of an assignment once its first target has been parsed. Does not consume a terminator.
    fn assignment(&mut self, loc: Location, first: AstNode) -> Result<AstNode, ParseError> {
        let mut targets = vec![first];
        while self.advance_if(TokenKind::Comma).is_some() {
            targets.push(self.expression()?);
        }
        let op = self.assignment_operator()?;
        let mut values = vec![self.expression()?];
        while self.advance_if(TokenKind::Comma).is_some() {
            values.push(self.expression()?);
        }
        Ok(AstNode::new(loc, AssignmentStmt { op, targets, values }))
    }

    fn assignment_operator(&mut self) -> Result<AssignOp, ParseError> {
        match assign_op(self.peek()) {
            Some(op) => {
                self.advance();
                Ok(op)
            }
            None => Err(self.unexpected(Expected::AssignmentOperator)),
        }
    }
}
