use std::{fmt, ops};
pub use self::index_map::{VarHeap, VarMap};

pub mod assignment;
pub mod clause;
mod index_map;


/// A propositional variable over a dense, contiguous index space.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct Var(usize);

impl Var {
    #[inline]
    pub fn from_index(index: usize) -> Var {
        Var(index)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }

    /// Literal over this variable; `sign` set means negated.
    #[inline]
    pub fn lit(&self, sign: bool) -> Lit {
        Lit((self.0 << 1) | (sign as usize))
    }

    #[inline]
    pub fn pos_lit(&self) -> Lit {
        Lit(self.0 << 1)
    }

    #[inline]
    pub fn neg_lit(&self) -> Lit {
        Lit((self.0 << 1) | 1)
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}


/// A variable or its negation, packed into one word.
#[derive(PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct Lit(usize);

impl Lit {
    #[inline]
    pub fn sign(&self) -> bool {
        (self.0 & 1) != 0
    }

    #[inline]
    pub fn var(&self) -> Var {
        Var(self.0 >> 1)
    }

    #[inline]
    pub fn var_index(&self) -> usize {
        self.0 >> 1
    }

    #[inline]
    pub fn sign_index(&self) -> usize {
        self.0 & 1
    }
}

impl ops::Not for Lit {
    type Output = Lit;

    #[inline]
    fn not(self) -> Lit {
        Lit(self.0 ^ 1)
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.sign() {
            write!(f, "¬")?;
        }
        write!(f, "{:?}", self.var())
    }
}
