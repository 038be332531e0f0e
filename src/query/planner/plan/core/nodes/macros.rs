//! 计划节点宏定义
//!
//! 提供宏来简化计划节点的定义，减少样板代码

/// 定义无输入的计划节点（叶子节点）
///
/// 生成的结构体带有 `id` 字段；克隆时重新分配节点ID。
/// 节点需自行实现 `col_names()` 与 `describe()`。
///
/// # 示例
/// ```ignore
/// define_plan_node! {
///     pub struct ScanNode {
///         table: String,
///         columns: Vec<String>,
///     }
///     enum: Scan
/// }
/// ```
#[macro_export]
macro_rules! define_plan_node {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($field:ident: $type:ty),* $(,)?
        }
        enum: $variant:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            id: i64,
            $($field: $type,)*
        }

        impl Clone for $name {
            fn clone(&self) -> Self {
                use $crate::query::planner::plan::core::node_id_generator::next_node_id;
                Self {
                    id: next_node_id(),
                    $($field: self.$field.clone(),)*
                }
            }
        }

        impl $name {
            pub fn id(&self) -> i64 {
                self.id
            }

            pub fn type_name(&self) -> &'static str {
                stringify!($name)
            }
        }

        impl $crate::query::planner::plan::core::nodes::plan_node_traits::PlanNode for $name {
            fn id(&self) -> i64 {
                self.id()
            }

            fn name(&self) -> &'static str {
                self.type_name()
            }

            fn col_names(&self) -> &[String] {
                self.col_names()
            }
        }
    };
}

/// 定义单输入的计划节点
///
/// 在 `define_plan_node!` 的基础上增加 `input` 字段，
/// 并实现 `SingleInputNode` trait。
#[macro_export]
macro_rules! define_plan_node_with_deps {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $($field:ident: $type:ty),* $(,)?
        }
        enum: $variant:ident
        input: SingleInputNode
    ) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            id: i64,
            input: Box<$crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeEnum>,
            $($field: $type,)*
        }

        impl Clone for $name {
            fn clone(&self) -> Self {
                use $crate::query::planner::plan::core::node_id_generator::next_node_id;
                Self {
                    id: next_node_id(),
                    input: self.input.clone(),
                    $($field: self.$field.clone(),)*
                }
            }
        }

        impl $name {
            pub fn id(&self) -> i64 {
                self.id
            }

            pub fn type_name(&self) -> &'static str {
                stringify!($name)
            }
        }

        impl $crate::query::planner::plan::core::nodes::plan_node_traits::PlanNode for $name {
            fn id(&self) -> i64 {
                self.id()
            }

            fn name(&self) -> &'static str {
                self.type_name()
            }

            fn col_names(&self) -> &[String] {
                self.col_names()
            }
        }

        impl $crate::query::planner::plan::core::nodes::plan_node_traits::SingleInputNode for $name {
            fn input(&self) -> &$crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeEnum {
                &self.input
            }

            fn set_input(&mut self, input: $crate::query::planner::plan::core::nodes::plan_node_enum::PlanNodeEnum) {
                self.input = Box::new(input);
            }
        }
    };
}
