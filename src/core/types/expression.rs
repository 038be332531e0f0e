//! 表达式类型定义
//!
//! 计划节点中使用的统一表达式类型 `Expression`，以及投影/聚合输出列 `YieldColumn`。
//!
//! 列引用 `Expression::Column` 是计划节点之间传递数据的唯一方式：
//! 节点的输出列集合由 `Column(alias)` 组成，上层节点只能引用下层输出中存在的列。

use crate::core::types::operators::{AggregateFunction, BinaryOperator, UnaryOperator};
use crate::core::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 统一表达式类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// 字面量值
    Literal(Value),

    /// 列引用
    Column(String),

    /// 属性访问
    Property {
        object: Box<Expression>,
        property: String,
    },

    /// 二元运算
    Binary {
        left: Box<Expression>,
        op: BinaryOperator,
        right: Box<Expression>,
    },

    /// 一元运算
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// 函数调用
    Function {
        name: String,
        args: Vec<Expression>,
    },

    /// 聚合函数
    Aggregate {
        func: AggregateFunction,
        arg: Box<Expression>,
        distinct: bool,
    },
}

impl Expression {
    /// 创建列引用
    pub fn column(name: impl Into<String>) -> Self {
        Expression::Column(name.into())
    }

    /// 创建字面量
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Literal(value.into())
    }

    /// 创建二元运算
    pub fn binary(left: Expression, op: BinaryOperator, right: Expression) -> Self {
        Expression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// 创建函数调用
    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::Function {
            name: name.into(),
            args,
        }
    }

    /// 创建聚合函数
    pub fn aggregate(func: AggregateFunction, arg: Expression) -> Self {
        Expression::Aggregate {
            func,
            arg: Box::new(arg),
            distinct: false,
        }
    }

    /// 是否为纯列引用
    pub fn is_column(&self) -> bool {
        matches!(self, Expression::Column(_))
    }

    /// 获取列名（仅当为列引用时）
    pub fn as_column(&self) -> Option<&str> {
        match self {
            Expression::Column(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// 收集表达式引用的所有列名
    pub fn referenced_columns(&self) -> Vec<&str> {
        let mut columns = Vec::new();
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns<'a>(&'a self, columns: &mut Vec<&'a str>) {
        match self {
            Expression::Literal(_) => {}
            Expression::Column(name) => {
                if !columns.contains(&name.as_str()) {
                    columns.push(name.as_str());
                }
            }
            Expression::Property { object, .. } => object.collect_columns(columns),
            Expression::Binary { left, right, .. } => {
                left.collect_columns(columns);
                right.collect_columns(columns);
            }
            Expression::Unary { operand, .. } => operand.collect_columns(columns),
            Expression::Function { args, .. } => {
                for arg in args {
                    arg.collect_columns(columns);
                }
            }
            Expression::Aggregate { arg, .. } => arg.collect_columns(columns),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(v) => write!(f, "{}", v),
            Expression::Column(name) => write!(f, "{}", name),
            Expression::Property { object, property } => write!(f, "{}.{}", object, property),
            Expression::Binary { left, op, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Expression::Unary { op, operand } => {
                if op.is_postfix() {
                    write!(f, "{}{}", operand, op.symbol())
                } else {
                    write!(f, "{}{}", op.symbol(), operand)
                }
            }
            Expression::Function { name, args } => {
                let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{}({})", name, args.join(", "))
            }
            Expression::Aggregate {
                func,
                arg,
                distinct,
            } => {
                if *distinct {
                    write!(f, "{}(DISTINCT {})", func.name(), arg)
                } else {
                    write!(f, "{}({})", func.name(), arg)
                }
            }
        }
    }
}

/// 输出列定义
///
/// 投影和聚合节点的每一个输出列，`alias` 即该列在上层可见的列名。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldColumn {
    pub expression: Expression,
    pub alias: String,
}

impl YieldColumn {
    pub fn new(expression: Expression, alias: impl Into<String>) -> Self {
        Self {
            expression,
            alias: alias.into(),
        }
    }

    /// 创建直接透传某一列的输出列
    pub fn column(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            expression: Expression::Column(name.clone()),
            alias: name,
        }
    }

    /// 该输出列在上层可见的列引用
    pub fn to_column(&self) -> Expression {
        Expression::Column(self.alias.clone())
    }

    /// 是否为对 `expr` 的直接透传
    ///
    /// 只有表达式与别名都指向同一列时才算透传，`b AS a` 不算 `a` 的透传。
    pub fn passes_through(&self, expr: &Expression) -> bool {
        match expr {
            Expression::Column(name) => &self.expression == expr && &self.alias == name,
            _ => false,
        }
    }
}

impl fmt::Display for YieldColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.expression {
            Expression::Column(name) if name == &self.alias => write!(f, "{}", name),
            expr => write!(f, "{} AS {}", expr, self.alias),
        }
    }
}
