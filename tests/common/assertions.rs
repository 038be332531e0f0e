//! 自定义断言辅助模块

use topn_agg::query::planner::plan::PlanNodeEnum;

/// 断言结果成功，返回内部值
pub fn assert_ok<T, E: std::fmt::Debug>(result: Result<T, E>) -> T {
    result.expect("操作应该成功")
}

/// 断言结果失败并匹配错误消息
pub fn assert_err_with<T: std::fmt::Debug, E: std::fmt::Display>(
    result: Result<T, E>,
    expected_msg: &str,
) {
    let err = result.expect_err("操作应该失败");
    let err_str = err.to_string();
    assert!(
        err_str.contains(expected_msg),
        "错误消息应包含 '{}', 实际是 '{}'",
        expected_msg,
        err_str
    );
}

/// 断言计划的 EXPLAIN 文本逐行一致
pub fn assert_explain(plan: &PlanNodeEnum, expected: &[&str]) {
    let actual = plan.explain();
    let actual_lines: Vec<&str> = actual.lines().collect();
    assert_eq!(
        actual_lines, expected,
        "计划不一致，实际计划:\n{}",
        actual
    );
}

/// 断言计划从根到叶的节点名称序列
pub fn assert_shape(plan: &PlanNodeEnum, expected: &[&str]) {
    let mut names = Vec::new();
    let mut current = Some(plan);
    while let Some(node) = current {
        names.push(node.name());
        current = node.input();
    }
    assert_eq!(names, expected, "计划形状不一致:\n{}", plan.explain());
}
