/// Type expression parsing.
///
/// Types are names (`i32`, `std.Vec`), `any`, or array types: `[N] T`, `[N : s] T`, `[] T` and `[: s] T`, with
/// optional `align(n)`/`const`/`volatile` qualifiers before the element type.
impl<'a> Parser<'a> {
    fn type_expr(&mut self) -> Result<AstNode, ParseError> {
        self.nested(Self::type_operand)
    }

    fn type_operand(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.loc();
        match self.peek() {
            TokenKind::LSquareBrack => self.array_type(loc),
            TokenKind::Any => {
                self.advance();
                Ok(AstNode::new(loc, Identifier::new("any")))
            }
            TokenKind::Identifier => {
                let mut ty = AstNode::new(loc, Identifier::new(self.identifier()?));
                while self.advance_if(TokenKind::Dot).is_some() {
                    let field = self.identifier()?;
                    let loc = ty.loc.clone();
                    ty = AstNode::new(
                        loc,
                        FieldAccessExpr {
                            target: Box::new(ty),
                            field,
                        },
                    );
                }
                Ok(ty)
            }
            _ => Err(self.construct_error(Expected::Type)),
        }
    }

    fn array_type(&mut self, loc: Location) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::LSquareBrack)?;
        let size = match self.peek() {
            TokenKind::RSquareBrack | TokenKind::Colon => None,
            _ => Some(Box::new(self.expression()?)),
        };
        let sentinel = if self.advance_if(TokenKind::Colon).is_some() {
            Some(Box::new(self.expression()?))
        } else {
            None
        };
        self.expect(TokenKind::RSquareBrack)?;
        let qualifiers = self.array_qualifiers()?;
        let child = Box::new(self.type_expr()?);

        Ok(match size {
            Some(size) => AstNode::new(
                loc,
                ArrayType {
                    size,
                    sentinel,
                    qualifiers,
                    child,
                },
            ),
            None => AstNode::new(
                loc,
                InferredArrayType {
                    sentinel,
                    qualifiers,
                    child,
                },
            ),
        })
    }

    fn array_qualifiers(&mut self) -> Result<ArrayQualifiers, ParseError> {
        let mut qualifiers = ArrayQualifiers::default();
        loop {
            match self.peek() {
                TokenKind::Align => {
                    self.advance();
                    self.expect(TokenKind::LParen)?;
                    qualifiers.align = Some(Box::new(self.expression()?));
                    self.expect(TokenKind::RParen)?;
                }
                TokenKind::Const => {
                    self.advance();
                    qualifiers.is_const = true;
                }
                TokenKind::Volatile => {
                    self.advance();
                    qualifiers.is_volatile = true;
                }
                _ => return Ok(qualifiers),
            }
        }
    }
}
