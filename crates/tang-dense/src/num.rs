//! Conversion of primitive numbers to `f64` for scalar broadcasts.

/// Any primitive numeric type accepted by `add_num`, `sub_num`, `mul_num`.
///
/// Integers wider than 53 bits round to the nearest representable `f64`.
pub trait IntoF64: Copy {
    fn into_f64(self) -> f64;
}

macro_rules! impl_into_f64 {
    ($($t:ty),*) => {
        $(
            impl IntoF64 for $t {
                #[inline]
                fn into_f64(self) -> f64 { self as f64 }
            }
        )*
    };
}

impl_into_f64!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize, f32, f64);
