/// 轮播展示的配置
mod config;
/// 轮播组件本体：位置映射与状态迁移
mod display;
/// 错误类型
mod error;
/// 拖动手势识别
mod gesture;
/// 五个可视位置
mod position;
/// 多实例注册表与启动规划
mod registry;
/// 定时器抽象
mod timer;

pub use config::*;
pub use display::*;
pub use error::*;
pub use gesture::*;
pub use position::*;
pub use registry::*;
pub use timer::*;
