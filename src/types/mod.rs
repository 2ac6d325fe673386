//! Type tags and their parsed form.
//!
//! A type tag is the string a module ABI uses to declare a parameter or
//! return type: a primitive (`u64`, `address`, ...), `vector<T>`, or a
//! struct path such as `0x1::guid::GUID`. [`TypeDescriptor::parse`] turns
//! one into a tree that the encoder and decoders walk.
//!
//! # Module Organization
//!
//! - [`address`]: 32-byte account addresses
//! - [`error`]: Error types for tag parsing

mod address;
mod error;

pub use address::AccountAddress;
pub use error::TypeTagError;

use std::fmt;
use std::str::FromStr;

/// Deepest nesting the parser accepts before giving up.
pub const MAX_TYPE_DEPTH: usize = 64;

/// Primitive type names understood by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    Address,
    Signer,
    /// `0x1::string::String`
    String,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 10] = [
        PrimitiveKind::Bool,
        PrimitiveKind::U8,
        PrimitiveKind::U16,
        PrimitiveKind::U32,
        PrimitiveKind::U64,
        PrimitiveKind::U128,
        PrimitiveKind::U256,
        PrimitiveKind::Address,
        PrimitiveKind::Signer,
        PrimitiveKind::String,
    ];

    /// The tag as written in an ABI.
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "bool",
            PrimitiveKind::U8 => "u8",
            PrimitiveKind::U16 => "u16",
            PrimitiveKind::U32 => "u32",
            PrimitiveKind::U64 => "u64",
            PrimitiveKind::U128 => "u128",
            PrimitiveKind::U256 => "u256",
            PrimitiveKind::Address => "address",
            PrimitiveKind::Signer => "signer",
            PrimitiveKind::String => "0x1::string::String",
        }
    }

    /// Keyword primitives. The string type is a struct path and is
    /// recognised by the parser separately.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "bool" => Some(PrimitiveKind::Bool),
            "u8" => Some(PrimitiveKind::U8),
            "u16" => Some(PrimitiveKind::U16),
            "u32" => Some(PrimitiveKind::U32),
            "u64" => Some(PrimitiveKind::U64),
            "u128" => Some(PrimitiveKind::U128),
            "u256" => Some(PrimitiveKind::U256),
            "address" => Some(PrimitiveKind::Address),
            "signer" => Some(PrimitiveKind::Signer),
            _ => None,
        }
    }

    /// Bit width of an unsigned integer kind.
    pub fn integer_bits(self) -> Option<usize> {
        match self {
            PrimitiveKind::U8 => Some(8),
            PrimitiveKind::U16 => Some(16),
            PrimitiveKind::U32 => Some(32),
            PrimitiveKind::U64 => Some(64),
            PrimitiveKind::U128 => Some(128),
            PrimitiveKind::U256 => Some(256),
            _ => None,
        }
    }

    pub fn is_integer(self) -> bool {
        self.integer_bits().is_some()
    }

    /// Integers too wide for a host double to hold exactly.
    pub fn is_wide_integer(self) -> bool {
        self.integer_bits().is_some_and(|bits| bits >= 64)
    }
}

/// A fully qualified struct path with optional type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructTag {
    pub address: AccountAddress,
    pub module: String,
    pub name: String,
    pub type_args: Vec<TypeDescriptor>,
}

impl StructTag {
    fn is_std_string(&self) -> bool {
        self.address == AccountAddress::ONE
            && self.module == "string"
            && self.name == "String"
            && self.type_args.is_empty()
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.address.to_short_string(),
            self.module,
            self.name
        )?;
        if !self.type_args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// Parsed form of a type tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    Vector(Box<TypeDescriptor>),
    StructRef(StructTag),
    /// `&T` or `&mut T`, as found in ABI parameter lists.
    Reference {
        mutable: bool,
        inner: Box<TypeDescriptor>,
    },
    /// Generic placeholder `T<index>`.
    Generic(u16),
}

impl TypeDescriptor {
    /// Parse a type tag string.
    pub fn parse(tag: &str) -> Result<Self, TypeTagError> {
        let mut parser = TagParser::new(tag);
        let ty = parser.parse_type(0)?;
        parser.skip_ws();
        if parser.pos != tag.len() {
            return Err(TypeTagError::malformed(tag, "unexpected trailing input"));
        }
        Ok(ty)
    }

    /// Whether this is `signer` or a reference to it.
    pub fn is_signer(&self) -> bool {
        match self {
            TypeDescriptor::Primitive(PrimitiveKind::Signer) => true,
            TypeDescriptor::Reference { inner, .. } => inner.is_signer(),
            _ => false,
        }
    }

    /// Whether a value of this type can be instantiated in a transaction:
    /// no generic placeholders, references or signer, at any depth.
    pub fn is_concrete(&self) -> bool {
        match self {
            TypeDescriptor::Primitive(kind) => *kind != PrimitiveKind::Signer,
            TypeDescriptor::Vector(inner) => inner.is_concrete(),
            TypeDescriptor::StructRef(tag) => tag.type_args.iter().all(TypeDescriptor::is_concrete),
            TypeDescriptor::Reference { .. } | TypeDescriptor::Generic(_) => false,
        }
    }

    /// The primitive kind, if this is one.
    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match self {
            TypeDescriptor::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Replace generic placeholders with concrete type arguments.
    pub fn substitute(&self, type_args: &[TypeDescriptor]) -> Result<Self, TypeTagError> {
        Ok(match self {
            TypeDescriptor::Generic(index) => type_args
                .get(usize::from(*index))
                .cloned()
                .ok_or(TypeTagError::UnboundGeneric {
                    index: *index,
                    available: type_args.len(),
                })?,
            TypeDescriptor::Vector(inner) => {
                TypeDescriptor::Vector(Box::new(inner.substitute(type_args)?))
            }
            TypeDescriptor::Reference { mutable, inner } => TypeDescriptor::Reference {
                mutable: *mutable,
                inner: Box::new(inner.substitute(type_args)?),
            },
            TypeDescriptor::StructRef(tag) => TypeDescriptor::StructRef(StructTag {
                address: tag.address,
                module: tag.module.clone(),
                name: tag.name.clone(),
                type_args: tag
                    .type_args
                    .iter()
                    .map(|arg| arg.substitute(type_args))
                    .collect::<Result<_, _>>()?,
            }),
            TypeDescriptor::Primitive(_) => self.clone(),
        })
    }
}

impl FromStr for TypeDescriptor {
    type Err = TypeTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(kind) => f.write_str(kind.name()),
            TypeDescriptor::Vector(inner) => write!(f, "vector<{inner}>"),
            TypeDescriptor::StructRef(tag) => write!(f, "{tag}"),
            TypeDescriptor::Reference { mutable: true, inner } => write!(f, "&mut {inner}"),
            TypeDescriptor::Reference { mutable: false, inner } => write!(f, "&{inner}"),
            TypeDescriptor::Generic(index) => write!(f, "T{index}"),
        }
    }
}

/// Single-pass recursive descent over a type tag.
struct TagParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TagParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn error(&self, reason: impl Into<String>) -> TypeTagError {
        TypeTagError::malformed(self.input, reason)
    }

    fn rest(&self) -> &'a str {
        self.input.get(self.pos..).unwrap_or_default()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), TypeTagError> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{token}' at offset {}", self.pos)))
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        self.skip_ws();
        let rest = self.rest();
        let boundary = rest
            .get(keyword.len()..)
            .and_then(|after| after.chars().next())
            .is_none_or(|c| !is_ident_char(c));
        if rest.starts_with(keyword) && boundary {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Result<&'a str, TypeTagError> {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|(_, c)| !is_ident_char(*c))
            .map_or(rest.len(), |(i, _)| i);
        if len == 0 {
            return Err(self.error(format!("expected identifier at offset {}", self.pos)));
        }
        self.pos += len;
        rest.get(..len)
            .ok_or_else(|| self.error("identifier out of range"))
    }

    fn parse_type(&mut self, depth: usize) -> Result<TypeDescriptor, TypeTagError> {
        if depth > MAX_TYPE_DEPTH {
            return Err(self.error(format!("nesting deeper than {MAX_TYPE_DEPTH}")));
        }

        if self.eat("&") {
            let mutable = self.eat_keyword("mut");
            let inner = self.parse_type(depth + 1)?;
            return Ok(TypeDescriptor::Reference {
                mutable,
                inner: Box::new(inner),
            });
        }

        let word = self.ident()?;

        if self.eat("::") {
            return self.parse_struct(word, depth);
        }

        if word == "vector" {
            self.expect("<")?;
            let inner = self.parse_type(depth + 1)?;
            self.expect(">")?;
            return Ok(TypeDescriptor::Vector(Box::new(inner)));
        }

        if let Some(kind) = PrimitiveKind::from_keyword(word) {
            return Ok(TypeDescriptor::Primitive(kind));
        }

        if let Some(index) = word.strip_prefix('T').and_then(|n| n.parse::<u16>().ok()) {
            return Ok(TypeDescriptor::Generic(index));
        }

        Err(self.error(format!("unknown type '{word}'")))
    }

    fn parse_struct(
        &mut self,
        address: &str,
        depth: usize,
    ) -> Result<TypeDescriptor, TypeTagError> {
        let address = AccountAddress::from_hex(address)
            .map_err(|_| self.error(format!("invalid address '{address}'")))?;
        let module = self.ident()?.to_string();
        self.expect("::")?;
        let name = self.ident()?.to_string();

        let mut type_args = Vec::new();
        if self.eat("<") {
            loop {
                type_args.push(self.parse_type(depth + 1)?);
                if self.eat(",") {
                    continue;
                }
                self.expect(">")?;
                break;
            }
        }

        let tag = StructTag {
            address,
            module,
            name,
            type_args,
        };
        if tag.is_std_string() {
            Ok(TypeDescriptor::Primitive(PrimitiveKind::String))
        } else {
            Ok(TypeDescriptor::StructRef(tag))
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
