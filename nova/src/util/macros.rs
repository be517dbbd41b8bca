#![allow(unused_macros)]
#![allow(unused_imports)]

#[macro_export]
macro_rules! symbols {
    {$( $key: expr => $val: expr ),* $(,)?} => {{
        $crate::Symbols::from_iter([$(($key.to_string(), $val as f64),)*])
    }}
}

pub use symbols;

#[cfg(test)]
mod tests {
    #[test]
    fn symbols() { 
        let s = symbols!{ "A" => 1.5, "B" => -2 };
        assert_eq!(s.len(), 2);
        assert_eq!(s.get("A"), Some(&1.5));
        assert_eq!(s.get("B"), Some(&-2.0));

        let e = symbols!{};
        assert!(e.is_empty());
    }
}
