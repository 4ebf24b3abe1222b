/// Expression parsing.
///
/// This chunk implements expression parsing with precedence climbing, prefix/postfix operators, primary forms,
/// and the block-like expressions (`if`, `while`, `for`, `match`, lambdas).
///
/// ## Notes
/// - Precedence (lowest to highest): `catch`, `||`, `&&`, comparison (non-chaining), `|`, `^`, `&`/`&^`,
///   shifts, `+`/`-`, `*`/`/`/`%`, `as`, prefix, postfix.
/// - A binary node is located at its left operand.
/// - `expression` and `prefix` each take one nesting level, so operand nesting is bounded by `MAX_NESTING_DEPTH`.
impl<'a> Parser<'a> {
    fn expression(&mut self) -> Result<AstNode, ParseError> {
        self.nested(Self::catch_expr)
    }

    /// `lhs catch |err| rhs`
    fn catch_expr(&mut self) -> Result<AstNode, ParseError> {
        let lhs = self.bool_or()?;
        if self.advance_if(TokenKind::Catch).is_none() {
            return Ok(lhs);
        }
        let binding = if self.advance_if(TokenKind::Or).is_some() {
            let name = self.identifier()?;
            self.expect(TokenKind::Or)?;
            Some(name)
        } else {
            None
        };
        let rhs = if self.check(TokenKind::LBrace) {
            self.block()?
        } else {
            self.bool_or()?
        };
        let loc = lhs.loc.clone();
        Ok(AstNode::new(
            loc,
            CatchExpr {
                lhs: Box::new(lhs),
                binding,
                rhs: Box::new(rhs),
            },
        ))
    }

    /// One left-associative binary precedence level.
    fn binary_level(
        &mut self,
        next: fn(&mut Self) -> Result<AstNode, ParseError>,
        op_for: fn(TokenKind) -> Option<BinaryOp>,
    ) -> Result<AstNode, ParseError> {
        let mut lhs = next(self)?;
        while let Some(op) = op_for(self.peek()) {
            self.advance();
            let rhs = next(self)?;
            lhs = binary(lhs, op, rhs);
        }
        Ok(lhs)
    }

    fn bool_or(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(Self::bool_and, |kind| (kind == TokenKind::OrOr).then_some(BinaryOp::BoolOr))
    }

    fn bool_and(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(Self::comparison, |kind| (kind == TokenKind::AndAnd).then_some(BinaryOp::BoolAnd))
    }

    /// Comparisons do not chain: `a < b < c` stops after `a < b`.
    fn comparison(&mut self) -> Result<AstNode, ParseError> {
        let lhs = self.bit_or()?;
        match comparison_op(self.peek()) {
            Some(op) => {
                self.advance();
                let rhs = self.bit_or()?;
                Ok(binary(lhs, op, rhs))
            }
            None => Ok(lhs),
        }
    }

    fn bit_or(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(Self::bit_xor, |kind| (kind == TokenKind::Or).then_some(BinaryOp::BitOr))
    }

    fn bit_xor(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(Self::bit_and, |kind| (kind == TokenKind::Xor).then_some(BinaryOp::BitXor))
    }

    fn bit_and(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(Self::shift, |kind| match kind {
            TokenKind::And => Some(BinaryOp::BitAnd),
            TokenKind::AndNot => Some(BinaryOp::BitAndNot),
            _ => None,
        })
    }

    fn shift(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(Self::additive, |kind| match kind {
            TokenKind::Lbitshift => Some(BinaryOp::Shl),
            TokenKind::Rbitshift => Some(BinaryOp::Shr),
            _ => None,
        })
    }

    fn additive(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(Self::multiplicative, |kind| match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn multiplicative(&mut self) -> Result<AstNode, ParseError> {
        self.binary_level(Self::cast, |kind| match kind {
            TokenKind::Mult => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Mod => Some(BinaryOp::Mod),
            _ => None,
        })
    }

    /// `expr as T as U`
    fn cast(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.prefix()?;
        while self.advance_if(TokenKind::As).is_some() {
            let ty = self.type_expr()?;
            let loc = expr.loc.clone();
            expr = AstNode::new(
                loc,
                CastExpr {
                    style: CastStyle::As,
                    expr: Box::new(expr),
                    ty: Box::new(ty),
                    arg: None,
                },
            );
        }
        Ok(expr)
    }

    fn prefix(&mut self) -> Result<AstNode, ParseError> {
        self.nested(Self::unary)
    }

    fn unary(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.loc();
        let kind = self.peek();

        if let Some(op) = prefix_op(kind) {
            self.advance();
            let expr = self.prefix()?;
            return Ok(AstNode::new(loc, PrefixOpExpr { op, expr: Box::new(expr) }));
        }

        match kind {
            TokenKind::Await => {
                self.advance();
                let expr = self.prefix()?;
                Ok(AstNode::new(loc, AwaitExpr { expr: Box::new(expr) }))
            }
            TokenKind::Typeof => {
                self.advance();
                let expr = self.prefix()?;
                Ok(AstNode::new(loc, TypeOfExpr { expr: Box::new(expr) }))
            }
            TokenKind::Cast => self.cast_keyword(loc),
            TokenKind::Inline | TokenKind::NoInline => {
                self.advance();
                let modifier = if kind == TokenKind::Inline {
                    CallModifier::AlwaysInline
                } else {
                    CallModifier::NeverInline
                };
                let call = self.postfix()?;
                match call.kind {
                    NodeKind::Expr(Expr::FuncCall(mut call)) => {
                        call.modifier = modifier;
                        Ok(AstNode::new(loc, call))
                    }
                    _ => Err(self.unexpected(Expected::Token(TokenKind::LParen))),
                }
            }
            _ => self.postfix(),
        }
    }

    /// `cast ( T ) expr` or `cast ( T , arg ) expr`
    fn cast_keyword(&mut self, loc: Location) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Cast)?;
        self.expect(TokenKind::LParen)?;
        let ty = self.type_expr()?;
        let arg = if self.advance_if(TokenKind::Comma).is_some() {
            Some(Box::new(self.expression()?))
        } else {
            None
        };
        self.expect(TokenKind::RParen)?;
        let expr = self.prefix()?;
        Ok(AstNode::new(
            loc,
            CastExpr {
                style: CastStyle::Keyword,
                expr: Box::new(expr),
                ty: Box::new(ty),
                arg,
            },
        ))
    }

    /// Calls, field accesses, indexing and slicing.
    fn postfix(&mut self) -> Result<AstNode, ParseError> {
        let mut expr = self.primary()?;
        loop {
            let loc = expr.loc.clone();
            expr = match self.peek() {
                TokenKind::LParen => {
                    self.advance();
                    let (args, kwd_args) = self.call_arguments()?;
                    AstNode::new(
                        loc,
                        FuncCallExpr {
                            callee: Box::new(expr),
                            args,
                            kwd_args,
                            modifier: CallModifier::None,
                        },
                    )
                }
                TokenKind::Dot => {
                    self.advance();
                    let field = self.identifier()?;
                    AstNode::new(
                        loc,
                        FieldAccessExpr {
                            target: Box::new(expr),
                            field,
                        },
                    )
                }
                TokenKind::LSquareBrack => {
                    self.advance();
                    self.index_suffix(loc, expr)?
                }
                _ => return Ok(expr),
            };
        }
    }

    /// After `target[`: an index `i]` or a slice `lo? .. hi? (: sentinel)? ]`.
    fn index_suffix(&mut self, loc: Location, target: AstNode) -> Result<AstNode, ParseError> {
        let lower = if self.check(TokenKind::DDot) {
            None
        } else {
            let index = self.expression()?;
            if !self.check(TokenKind::DDot) {
                self.expect(TokenKind::RSquareBrack)?;
                return Ok(AstNode::new(
                    loc,
                    ArrayAccessExpr {
                        target: Box::new(target),
                        index: Box::new(index),
                    },
                ));
            }
            Some(Box::new(index))
        };

        self.expect(TokenKind::DDot)?;
        let upper = self.range_end()?;
        let sentinel = if self.advance_if(TokenKind::Colon).is_some() {
            Some(Box::new(self.expression()?))
        } else {
            None
        };
        self.expect(TokenKind::RSquareBrack)?;
        Ok(AstNode::new(
            loc,
            SliceExpr {
                target: Box::new(target),
                lower,
                upper,
                sentinel,
            },
        ))
    }

    /// `arg, ..., name = value, ... )`: keyword arguments follow the positional ones. Consumes `)`.
    fn call_arguments(&mut self) -> Result<(Vec<AstNode>, Vec<KeywordArg>), ParseError> {
        let mut args = Vec::new();
        let mut kwd_args = Vec::new();
        while !self.check(TokenKind::RParen) {
            if self.check(TokenKind::Identifier) && self.peek_next() == TokenKind::Equals {
                let name = self.identifier()?;
                self.expect(TokenKind::Equals)?;
                let value = self.expression()?;
                kwd_args.push(KeywordArg { name, value });
            } else if kwd_args.is_empty() {
                args.push(self.expression()?);
            } else {
                return Err(self.unexpected(Expected::KeywordArgument));
            }
            if self.advance_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok((args, kwd_args))
    }

    fn primary(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.loc();
        let kind = self.peek();
        if kind.is_primary_expression_start() {
            return self.operand(loc, kind);
        }
        match kind {
            TokenKind::LBrace => {
                self.advance();
                let exprs = self.expression_list(TokenKind::RBrace)?;
                Ok(AstNode::new(loc, SetExpr { exprs }))
            }
            TokenKind::LSquareBrack => {
                self.advance();
                let entries = self.expression_list(TokenKind::RSquareBrack)?;
                Ok(AstNode::new(loc, InitExpr { entries }))
            }
            TokenKind::If => self.if_expr(loc),
            TokenKind::While => self.while_loop(loc),
            TokenKind::For => self.for_loop(loc),
            TokenKind::Match => self.match_expr(loc),
            _ => Err(self.construct_error(Expected::Expression)),
        }
    }

    /// Operands that can start a primary expression: literals, identifiers, `null`, `( expr )` and lambdas.
    fn operand(&mut self, loc: Location, kind: TokenKind) -> Result<AstNode, ParseError> {
        match kind {
            TokenKind::Null => {
                self.advance();
                Ok(AstNode::new(loc, Literal::Nil))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::Func => self.lambda(loc),
            TokenKind::Illegal => Err(self.construct_error(Expected::Expression)),
            _ => self.literal(),
        }
    }

    /// Identifiers and literal values.
    fn literal(&mut self) -> Result<AstNode, ParseError> {
        let token = self.current();
        let loc = token.location();
        let text = token.text.as_str();

        let integer = |width: IntWidth, suffix: &str| Literal::Integer {
            value: strip_number_suffix(text, suffix),
            width,
        };
        let float = |width: FloatWidth, suffix: &str| Literal::Float {
            value: strip_number_suffix(text, suffix),
            width,
        };

        let literal = match token.kind {
            TokenKind::Identifier => {
                self.advance();
                return Ok(AstNode::new(loc, Identifier::new(text)));
            }
            TokenKind::Integer | TokenKind::BinInt | TokenKind::HexInt => integer(IntWidth::I32, ""),
            TokenKind::Int8Lit => integer(IntWidth::I8, "i8"),
            TokenKind::Int16Lit => integer(IntWidth::I16, "i16"),
            TokenKind::Int32Lit => integer(IntWidth::I32, "i32"),
            TokenKind::Int64Lit => integer(IntWidth::I64, "i64"),
            TokenKind::UintLit => integer(IntWidth::U32, "u"),
            TokenKind::Uint8Lit => integer(IntWidth::U8, "u8"),
            TokenKind::Uint16Lit => integer(IntWidth::U16, "u16"),
            TokenKind::Uint32Lit => integer(IntWidth::U32, "u32"),
            TokenKind::Uint64Lit => integer(IntWidth::U64, "u64"),
            TokenKind::Float => float(FloatWidth::F32, ""),
            TokenKind::Float32Lit => float(FloatWidth::F32, "f32"),
            TokenKind::Float64Lit => float(FloatWidth::F64, "f64"),
            TokenKind::Float128Lit | TokenKind::Imag => return Err(ParseError::unsupported_literal(token)),
            TokenKind::Rune if text.starts_with("b'") => Literal::Byte(unquote(text)),
            TokenKind::Rune => Literal::Char(unquote(text)),
            TokenKind::String => Literal::String {
                value: unquote(text),
                style: if text.starts_with("f\"") {
                    StringStyle::Format
                } else {
                    StringStyle::Plain
                },
            },
            TokenKind::RawString => Literal::String {
                value: unquote(text),
                style: StringStyle::Raw,
            },
            TokenKind::TripleString => Literal::String {
                value: unquote(text),
                style: StringStyle::Plain,
            },
            TokenKind::True => Literal::Bool(true),
            TokenKind::False => Literal::Bool(false),
            _ => return Err(self.construct_error(Expected::Expression)),
        };

        self.advance();
        Ok(AstNode::new(loc, literal))
    }

    /// `func (params) -> T => expr` or `func (params) -> T { ... }`
    fn lambda(&mut self, loc: Location) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Func)?;
        let (params, _) = self.parameters()?;
        let return_type = self.return_type()?;
        let body = if self.advance_if(TokenKind::EqualsArrow).is_some() {
            self.expression()?
        } else {
            self.block()?
        };
        Ok(AstNode::new(
            loc,
            LambdaExpr {
                params,
                return_type,
                body: Box::new(body),
            },
        ))
    }

    /// `if c { } elseif c { } else { }`; each `elseif` nests another `if` in the else branch.
    fn if_expr(&mut self, loc: Location) -> Result<AstNode, ParseError> {
        self.advance();
        if self.check(TokenKind::Any) {
            return self.test_expr(loc);
        }
        let condition = self.expression()?;
        let then_block = self.block()?;
        let else_node = self.else_branch()?;
        Ok(AstNode::new(
            loc,
            IfExpr {
                condition: Box::new(condition),
                then_block: Box::new(then_block),
                else_node,
            },
        ))
    }

    /// `if any name = value { } else { }`: the then block runs with `name` bound when `value` holds one.
    fn test_expr(&mut self, loc: Location) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Any)?;
        let symbol = self.identifier()?;
        self.expect(TokenKind::Equals)?;
        let target = self.expression()?;
        let then_node = self.block()?;
        let else_node = self.else_branch()?;
        Ok(AstNode::new(
            loc,
            TestExpr {
                symbol,
                target: Box::new(target),
                then_node: Box::new(then_node),
                else_node,
            },
        ))
    }

    /// The optional `elseif ...` / `else if ...` / `else { }` tail of an `if`.
    fn else_branch(&mut self) -> Result<Option<Child>, ParseError> {
        let chained = match self.peek() {
            TokenKind::Elseif => true,
            TokenKind::Else => {
                self.advance();
                self.check(TokenKind::If)
            }
            _ => return Ok(None),
        };
        let node = if chained {
            let loc = self.loc();
            self.nested(|p| p.if_expr(loc))?
        } else {
            self.block()?
        };
        Ok(Some(Box::new(node)))
    }

    /// `while cond? { ... }`
    fn while_loop(&mut self, loc: Location) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::While)?;
        let condition = if self.check(TokenKind::LBrace) {
            None
        } else {
            Some(Box::new(self.expression()?))
        };
        let statements = self.block_statements()?;
        Ok(AstNode::new(loc, LoopWhileExpr { condition, statements }))
    }

    /// `for k, v in iterable { }` or `for init; cond; update { }`
    fn for_loop(&mut self, loc: Location) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::For)?;
        if self.check(TokenKind::Semicolon) {
            return self.c_loop(loc, None);
        }

        let var_loc = self.loc();
        let key_var = self.identifier()?;

        if self.check(TokenKind::Comma) || self.check(TokenKind::In) {
            let val_var = if self.advance_if(TokenKind::Comma).is_some() {
                Some(self.identifier()?)
            } else {
                None
            };
            self.expect(TokenKind::In)?;
            let (iterable, is_range) = self.range_or_expr()?;
            let statements = self.block_statements()?;
            return Ok(AstNode::new(
                loc,
                LoopInExpr {
                    key_var,
                    val_var,
                    iterable: Box::new(iterable),
                    is_range,
                    statements,
                },
            ));
        }

        if self.peek().is_assignment_operator() {
            let target = AstNode::new(var_loc.clone(), Identifier::new(key_var));
            let init = self.assignment(var_loc, target)?;
            return self.c_loop(loc, Some(init));
        }

        Err(self.unexpected(Expected::Token(TokenKind::In)))
    }

    /// The `; cond? ; update? { ... }` tail of a C-style loop.
    fn c_loop(&mut self, loc: Location, init: Option<AstNode>) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Semicolon)?;
        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.expression()?))
        };
        self.expect(TokenKind::Semicolon)?;
        let update = if self.check(TokenKind::LBrace) {
            None
        } else {
            let update_loc = self.loc();
            let expr = self.expression()?;
            if self.check(TokenKind::Comma) || self.peek().is_assignment_operator() {
                Some(Box::new(self.assignment(update_loc, expr)?))
            } else {
                Some(Box::new(expr))
            }
        };
        let statements = self.block_statements()?;
        Ok(AstNode::new(
            loc,
            LoopCExpr {
                init: init.map(Box::new),
                condition,
                update,
                statements,
            },
        ))
    }

    /// `match x { pattern, ... => body, else => body }`
    fn match_expr(&mut self, loc: Location) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Match)?;
        let scrutinee = self.expression()?;
        self.expect(TokenKind::LBrace)?;
        let mut branches = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            branches.push(self.match_branch()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(AstNode::new(
            loc,
            MatchExpr {
                scrutinee: Box::new(scrutinee),
                branches,
            },
        ))
    }

    fn match_branch(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.loc();
        let mut patterns = Vec::new();
        let mut any_patterns_are_ranges = false;
        let is_default = matches!(self.peek(), TokenKind::Else | TokenKind::Default);

        if is_default {
            self.advance();
        } else {
            loop {
                let (pattern, is_range) = self.range_or_expr()?;
                any_patterns_are_ranges |= is_range;
                patterns.push(pattern);
                if self.advance_if(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }

        self.expect(TokenKind::EqualsArrow)?;
        let body = if self.check(TokenKind::LBrace) {
            self.block()?
        } else {
            self.expression()?
        };
        self.advance_if(TokenKind::Comma);

        Ok(AstNode::new(
            loc,
            MatchBranchExpr {
                patterns,
                is_default,
                any_patterns_are_ranges,
                body: Box::new(body),
            },
        ))
    }

    /// An expression, or a range with either end open. Reports whether a range was parsed.
    fn range_or_expr(&mut self) -> Result<(AstNode, bool), ParseError> {
        let loc = self.loc();
        let start = if self.check(TokenKind::DDot) {
            None
        } else {
            let expr = self.expression()?;
            if !self.check(TokenKind::DDot) {
                return Ok((expr, false));
            }
            Some(Box::new(expr))
        };
        self.expect(TokenKind::DDot)?;
        let end = self.range_end()?;
        Ok((AstNode::new(loc, RangeExpr { start, end }), true))
    }

    /// The optional upper bound after `..`.
    fn range_end(&mut self) -> Result<Option<Child>, ParseError> {
        match self.peek() {
            TokenKind::LBrace
            | TokenKind::RSquareBrack
            | TokenKind::Colon
            | TokenKind::Comma
            | TokenKind::EqualsArrow
            | TokenKind::Semicolon => Ok(None),
            _ => Ok(Some(Box::new(self.expression()?))),
        }
    }
}

fn binary(lhs: AstNode, op: BinaryOp, rhs: AstNode) -> AstNode {
    let loc = lhs.loc.clone();
    AstNode::new(
        loc,
        BinaryOpExpr {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        },
    )
}
