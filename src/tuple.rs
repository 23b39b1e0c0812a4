//! Fixed-arity multi-channel value carriers.
//!
//! A tuple slot may be absent; consumers that write tuples into a
//! matrix substitute the element type's zero for absent components at
//! the point of consumption, never at construction.

use serde::{Deserialize, Serialize};

/// Two-component cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuple2<T> {
    v0: Option<T>,
    v1: Option<T>,
}

impl<T> Tuple2<T> {
    pub fn new(v0: T, v1: T) -> Self {
        Tuple2 {
            v0: Some(v0),
            v1: Some(v1),
        }
    }

    pub fn from_options(v0: Option<T>, v1: Option<T>) -> Self {
        Tuple2 { v0, v1 }
    }
}

impl<T: Copy> Tuple2<T> {
    pub fn get_0(&self) -> Option<T> {
        self.v0
    }

    pub fn get_1(&self) -> Option<T> {
        self.v1
    }
}

impl<T> From<(T, T)> for Tuple2<T> {
    fn from((v0, v1): (T, T)) -> Self {
        Tuple2::new(v0, v1)
    }
}

/// Three-component cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuple3<T> {
    v0: Option<T>,
    v1: Option<T>,
    v2: Option<T>,
}

impl<T> Tuple3<T> {
    pub fn new(v0: T, v1: T, v2: T) -> Self {
        Tuple3 {
            v0: Some(v0),
            v1: Some(v1),
            v2: Some(v2),
        }
    }

    pub fn from_options(v0: Option<T>, v1: Option<T>, v2: Option<T>) -> Self {
        Tuple3 { v0, v1, v2 }
    }
}

impl<T: Copy> Tuple3<T> {
    pub fn get_0(&self) -> Option<T> {
        self.v0
    }

    pub fn get_1(&self) -> Option<T> {
        self.v1
    }

    pub fn get_2(&self) -> Option<T> {
        self.v2
    }
}

impl<T> From<(T, T, T)> for Tuple3<T> {
    fn from((v0, v1, v2): (T, T, T)) -> Self {
        Tuple3::new(v0, v1, v2)
    }
}

/// Four-component cell value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuple4<T> {
    v0: Option<T>,
    v1: Option<T>,
    v2: Option<T>,
    v3: Option<T>,
}

impl<T> Tuple4<T> {
    pub fn new(v0: T, v1: T, v2: T, v3: T) -> Self {
        Tuple4 {
            v0: Some(v0),
            v1: Some(v1),
            v2: Some(v2),
            v3: Some(v3),
        }
    }

    pub fn from_options(
        v0: Option<T>,
        v1: Option<T>,
        v2: Option<T>,
        v3: Option<T>,
    ) -> Self {
        Tuple4 { v0, v1, v2, v3 }
    }
}

impl<T: Copy> Tuple4<T> {
    pub fn get_0(&self) -> Option<T> {
        self.v0
    }

    pub fn get_1(&self) -> Option<T> {
        self.v1
    }

    pub fn get_2(&self) -> Option<T> {
        self.v2
    }

    pub fn get_3(&self) -> Option<T> {
        self.v3
    }
}

impl<T> From<(T, T, T, T)> for Tuple4<T> {
    fn from((v0, v1, v2, v3): (T, T, T, T)) -> Self {
        Tuple4::new(v0, v1, v2, v3)
    }
}

pub fn t2<T>(v0: T, v1: T) -> Tuple2<T> {
    Tuple2::new(v0, v1)
}

pub fn t3<T>(v0: T, v1: T, v2: T) -> Tuple3<T> {
    Tuple3::new(v0, v1, v2)
}

pub fn t4<T>(v0: T, v1: T, v2: T, v3: T) -> Tuple4<T> {
    Tuple4::new(v0, v1, v2, v3)
}
