/// 可在任意 x 求值的一維曲線
pub trait Curve {
    fn value(&self, x: f64) -> f64;
}
