/// Declaration parsing.
///
/// This chunk implements parsing for top-level items: `module`/`import` statements, functions and prototypes,
/// `type` declarations (enum/struct/union/sum types), `const`/`global` bindings, variables and `use` aliases.
///
/// ## Notes
/// - Item dispatch is by the first token: anything that does not start a declaration is parsed as a statement.
/// - At item level `[` always opens an attribute list (`[inline] func ...`).
/// - `test` is contextual: it opens a test declaration only when a name string or `{` follows.
impl<'a> Parser<'a> {
    // ========================================================================
    // Items
    // ========================================================================

    fn item(&mut self) -> Result<AstNode, ParseError> {
        match self.peek() {
            TokenKind::Module => self.module_statement(self.loc(), Visibility::Private),
            TokenKind::Import => self.import_statement(),
            TokenKind::Semicolon => self.statement(),
            TokenKind::Identifier if self.at_test_decl() => self.test_decl(),
            kind if kind.is_decl_statement() || starts_declaration(kind) => self.declaration(),
            _ => self.statement(),
        }
    }

    fn declaration(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.loc();
        let attributes = self.attributes()?;
        let visibility = if self.advance_if(TokenKind::Export).is_some() {
            Visibility::Public
        } else {
            Visibility::Private
        };

        match self.peek() {
            TokenKind::Func | TokenKind::Extern => self.function(loc, attributes, visibility, None),
            TokenKind::Type => self.type_decl(loc, attributes, visibility),
            TokenKind::Struct | TokenKind::Class => {
                self.advance();
                let name = self.identifier()?;
                self.struct_decl(loc, name, attributes, visibility)
            }
            TokenKind::Enum => {
                self.advance();
                let name = self.identifier()?;
                self.enum_decl(loc, name, attributes, visibility)
            }
            TokenKind::Union => {
                self.advance();
                let name = self.identifier()?;
                self.union_decl(loc, name, attributes, visibility)
            }
            kind if !attributes.is_empty() => Err(if kind.is_eof() {
                self.construct_error(Expected::Declaration)
            } else {
                self.unexpected(Expected::Token(TokenKind::Func))
            }),
            TokenKind::Module => self.module_statement(loc, visibility),
            TokenKind::Const => self.const_decl(loc, visibility),
            TokenKind::Global => self.global_decl(loc, visibility),
            TokenKind::Any => self.var_decl(loc, visibility),
            TokenKind::Use => self.alias_decl(loc, visibility),
            _ => Err(self.construct_error(Expected::Declaration)),
        }
    }

    fn at_test_decl(&self) -> bool {
        self.current().text == TEST_KEYWORD
            && matches!(
                self.peek_next(),
                TokenKind::String | TokenKind::RawString | TokenKind::TripleString | TokenKind::LBrace
            )
    }

    /// `test "name"? { ... }`
    fn test_decl(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.loc();
        self.advance();
        let name = match self.peek() {
            TokenKind::String | TokenKind::RawString | TokenKind::TripleString => {
                let name = unquote(&self.current().text);
                self.advance();
                Some(name)
            }
            _ => None,
        };
        let body = self.block()?;
        Ok(AstNode::new(loc, TestDecl { name, body: Box::new(body) }))
    }

    /// `module a.b;`
    fn module_statement(&mut self, loc: Location, visibility: Visibility) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Module)?;
        let path = self.dotted_path()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(AstNode::new(loc, ModuleStmt { path, visibility }))
    }

    /// `import a.b as c;`
    fn import_statement(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.loc();
        self.expect(TokenKind::Import)?;
        let path = self.dotted_path()?;
        let alias = self.optional_alias()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(AstNode::new(loc, ImportStmt { path, alias }))
    }

    /// `use a.b as c;`
    fn alias_decl(&mut self, loc: Location, visibility: Visibility) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Use)?;
        let path = self.dotted_path()?;
        let alias = self.optional_alias()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(AstNode::new(loc, AliasDecl { visibility, path, alias }))
    }

    fn optional_alias(&mut self) -> Result<Option<String>, ParseError> {
        if self.advance_if(TokenKind::As).is_some() {
            Ok(Some(self.identifier()?))
        } else {
            Ok(None)
        }
    }

    /// Zero or more `[name]` attributes. `inline` and `noinline` are keywords but valid attribute names.
    fn attributes(&mut self) -> Result<Vec<String>, ParseError> {
        let mut attributes = Vec::new();
        while self.advance_if(TokenKind::LSquareBrack).is_some() {
            let name = match self.peek() {
                TokenKind::Inline | TokenKind::NoInline => self.advance().as_str().to_string(),
                _ => self.identifier()?,
            };
            self.expect(TokenKind::RSquareBrack)?;
            attributes.push(name);
        }
        Ok(attributes)
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// `extern? func name(params) -> ret` followed by a body, or by `;` for a prototype.
    fn function(
        &mut self,
        loc: Location,
        attributes: Vec<String>,
        visibility: Visibility,
        parent_type: Option<String>,
    ) -> Result<AstNode, ParseError> {
        let is_extern = self.advance_if(TokenKind::Extern).is_some();
        self.expect(TokenKind::Func)?;
        let name = self.identifier()?;
        let (params, is_variadic) = self.parameters()?;
        let return_type = self.return_type()?;
        let (inline, is_noreturn) = function_attributes(&attributes);

        if !is_extern && self.check(TokenKind::LBrace) {
            let body = self.block()?;
            return Ok(AstNode::new(
                loc,
                FuncDecl {
                    is_main: name == "main" && parent_type.is_none(),
                    is_test: name.starts_with("test_"),
                    name,
                    visibility,
                    attributes,
                    inline,
                    is_noreturn,
                    parent_type,
                    params,
                    is_variadic,
                    return_type,
                    body: Box::new(body),
                },
            ));
        }

        self.expect(TokenKind::Semicolon)?;
        Ok(AstNode::new(
            loc,
            FuncPrototype {
                name,
                visibility,
                attributes,
                inline,
                is_extern,
                params,
                is_variadic,
                return_type,
            },
        ))
    }

    /// `( param, ... )`; also reports whether any parameter is variadic.
    fn parameters(&mut self) -> Result<(Vec<AstNode>, bool), ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        let mut is_variadic = false;
        while !self.check(TokenKind::RParen) {
            let param = self.parameter()?;
            if let NodeKind::Decl(Decl::Param(p)) = &param.kind {
                is_variadic |= p.is_variadic;
            }
            params.push(param);
            if self.advance_if(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok((params, is_variadic))
    }

    /// `mutable? name ...? T`
    fn parameter(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.loc();
        let is_mutable = self.advance_if(TokenKind::Mutable).is_some();
        let name = self.identifier()?;
        let is_variadic = self.advance_if(TokenKind::Ellipsis).is_some();
        let ty = self.type_expr()?;
        Ok(AstNode::new(
            loc,
            ParamDecl {
                name,
                ty: Box::new(ty),
                is_mutable,
                is_variadic,
            },
        ))
    }

    fn return_type(&mut self) -> Result<Option<Child>, ParseError> {
        if self.advance_if(TokenKind::RArrow).is_some() {
            Ok(Some(Box::new(self.type_expr()?)))
        } else {
            Ok(None)
        }
    }

    // ========================================================================
    // Type declarations
    // ========================================================================

    /// `type Name enum {..}`, `type Name struct {..}`, `type Name union {..}` or `type Name = A | B;`
    fn type_decl(&mut self, loc: Location, attributes: Vec<String>, visibility: Visibility) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Type)?;
        let name = self.identifier()?;
        match self.peek() {
            TokenKind::Enum => {
                self.advance();
                self.enum_decl(loc, name, attributes, visibility)
            }
            TokenKind::Struct => {
                self.advance();
                self.struct_decl(loc, name, attributes, visibility)
            }
            TokenKind::Union => {
                self.advance();
                self.union_decl(loc, name, attributes, visibility)
            }
            _ => {
                self.expect(TokenKind::Equals)?;
                let mut variants = vec![self.type_expr()?];
                while self.advance_if(TokenKind::Or).is_some() {
                    variants.push(self.type_expr()?);
                }
                self.expect(TokenKind::Semicolon)?;
                Ok(AstNode::new(
                    loc,
                    SumTypeDecl {
                        name,
                        visibility,
                        attributes,
                        variants,
                    },
                ))
            }
        }
    }

    /// `{ Name (= value)? ,? ... }`
    fn enum_decl(
        &mut self,
        loc: Location,
        name: String,
        attributes: Vec<String>,
        visibility: Visibility,
    ) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut variants = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let variant_loc = self.loc();
            let variant_name = self.identifier()?;
            let value = if self.advance_if(TokenKind::Equals).is_some() {
                Some(Box::new(self.expression()?))
            } else {
                None
            };
            variants.push(EnumVariant {
                loc: variant_loc,
                name: variant_name,
                value,
            });
            self.advance_if(TokenKind::Comma);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(AstNode::new(
            loc,
            EnumDecl {
                name,
                visibility,
                attributes,
                variants,
            },
        ))
    }

    /// `{ field* method* }` in any order; methods record the struct as their parent type.
    fn struct_decl(
        &mut self,
        loc: Location,
        name: String,
        attributes: Vec<String>,
        visibility: Visibility,
    ) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut fields = Vec::new();
        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            match self.peek() {
                TokenKind::LSquareBrack | TokenKind::Func | TokenKind::Extern => {
                    let method_loc = self.loc();
                    let method_attributes = self.attributes()?;
                    methods.push(self.function(method_loc, method_attributes, Visibility::Private, Some(name.clone()))?);
                }
                _ => fields.push(self.field()?),
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(AstNode::new(
            loc,
            StructDecl {
                name,
                visibility,
                attributes,
                fields,
                methods,
            },
        ))
    }

    /// `{ field* }`
    fn union_decl(
        &mut self,
        loc: Location,
        name: String,
        attributes: Vec<String>,
        visibility: Visibility,
    ) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut fields = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            fields.push(self.field()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(AstNode::new(
            loc,
            UnionDecl {
                name,
                visibility,
                attributes,
                fields,
            },
        ))
    }

    /// `mutable? name T (= default)?;`
    fn field(&mut self) -> Result<AstNode, ParseError> {
        let loc = self.loc();
        let is_mutable = self.advance_if(TokenKind::Mutable).is_some();
        let name = self.identifier()?;
        let ty = self.type_expr()?;
        let value = self.initializer()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(AstNode::new(
            loc,
            VarDecl {
                name,
                visibility: Visibility::Private,
                is_mutable,
                ty: Some(Box::new(ty)),
                value,
            },
        ))
    }

    // ========================================================================
    // Bindings
    // ========================================================================

    /// `any mutable? name T? (= value)?;`
    fn var_decl(&mut self, loc: Location, visibility: Visibility) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Any)?;
        let is_mutable = self.advance_if(TokenKind::Mutable).is_some();
        let name = self.identifier()?;
        let ty = self.optional_binding_type()?;
        let value = self.initializer()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(AstNode::new(
            loc,
            VarDecl {
                name,
                visibility,
                is_mutable,
                ty,
                value,
            },
        ))
    }

    /// `const name T? = value;` or `const ( ... )`
    fn const_decl(&mut self, loc: Location, visibility: Visibility) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Const)?;
        let is_block = self.advance_if(TokenKind::LParen).is_some();
        let mut fields = Vec::new();
        if is_block {
            while !self.check(TokenKind::RParen) && !self.is_at_end() {
                fields.push(self.const_field()?);
            }
            self.expect(TokenKind::RParen)?;
        } else {
            fields.push(self.const_field()?);
        }
        Ok(AstNode::new(
            loc,
            ConstDecl {
                visibility,
                is_block,
                fields,
            },
        ))
    }

    fn const_field(&mut self) -> Result<ConstField, ParseError> {
        let loc = self.loc();
        let name = self.identifier()?;
        let ty = self.optional_binding_type()?;
        self.expect(TokenKind::Equals)?;
        let value = self.expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(ConstField {
            loc,
            name,
            ty,
            value: Box::new(value),
        })
    }

    /// `global name T? (= value)?;` or `global ( ... )`
    fn global_decl(&mut self, loc: Location, visibility: Visibility) -> Result<AstNode, ParseError> {
        self.expect(TokenKind::Global)?;
        let is_block = self.advance_if(TokenKind::LParen).is_some();
        let mut fields = Vec::new();
        if is_block {
            while !self.check(TokenKind::RParen) && !self.is_at_end() {
                fields.push(self.global_field()?);
            }
            self.expect(TokenKind::RParen)?;
        } else {
            fields.push(self.global_field()?);
        }
        Ok(AstNode::new(
            loc,
            GlobalDecl {
                visibility,
                is_block,
                fields,
            },
        ))
    }

    fn global_field(&mut self) -> Result<GlobalField, ParseError> {
        let loc = self.loc();
        let name = self.identifier()?;
        let ty = self.optional_binding_type()?;
        let value = self.initializer()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(GlobalField { loc, name, ty, value })
    }

    /// A type annotation unless the binding continues with `=` or ends with `;`.
    fn optional_binding_type(&mut self) -> Result<Option<Child>, ParseError> {
        match self.peek() {
            TokenKind::Equals | TokenKind::Semicolon => Ok(None),
            _ => Ok(Some(Box::new(self.type_expr()?))),
        }
    }

    fn initializer(&mut self) -> Result<Option<Child>, ParseError> {
        if self.advance_if(TokenKind::Equals).is_some() {
            Ok(Some(Box::new(self.expression()?)))
        } else {
            Ok(None)
        }
    }
}

/// Contextual keyword opening a test declaration.
const TEST_KEYWORD: &str = "test";

/// Item-level starters that [`TokenKind::is_decl_statement`] does not cover.
fn starts_declaration(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Type
            | TokenKind::Union
            | TokenKind::Const
            | TokenKind::Global
            | TokenKind::Use
            | TokenKind::Extern
            | TokenKind::Export
            | TokenKind::LSquareBrack
    )
}

/// Attribute marking a function that never returns. Not a keyword, so it is matched by name.
const NORETURN_ATTRIBUTE: &str = "noreturn";

fn function_attributes(attributes: &[String]) -> (FuncInline, bool) {
    let mut inline = FuncInline::Auto;
    let mut is_noreturn = false;
    for attribute in attributes {
        match TokenKind::from_spelling(attribute) {
            Some(TokenKind::Inline) => inline = FuncInline::Inline,
            Some(TokenKind::NoInline) => inline = FuncInline::NoInline,
            _ if attribute == NORETURN_ATTRIBUTE => is_noreturn = true,
            _ => {}
        }
    }
    (inline, is_noreturn)
}
