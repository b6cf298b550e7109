//! 核心宏定义

/// 为配置结构体实现Default trait的宏
///
/// 使用示例:
/// ```rust
/// use lua_bridge::impl_default;
///
/// struct LimitConfig {
///     max_depth: usize,
///     label: String,
/// }
///
/// impl_default!(LimitConfig {
///     max_depth: 16,
///     label: "in".to_string(),
/// });
/// ```
#[macro_export]
macro_rules! impl_default {
    ($struct_name:ident {
        $($field:ident: $value:expr),* $(,)?
    }) => {
        impl Default for $struct_name {
            fn default() -> Self {
                Self {
                    $($field: $value),*
                }
            }
        }
    };
}
