use crate::dates::{safe_format_date, DateFormat};
use crate::model::{sort_by_priority, Task};

/// Plain-text task list for the CLI, in display (priority) order.
pub fn format_task_list(tasks: &[Task]) -> String {
    let mut out = String::new();
    for task in sort_by_priority(tasks) {
        let due = match task.due_date.as_deref() {
            Some(d) => format!(" (due: {})", safe_format_date(Some(d), DateFormat::Human)),
            None => String::new(),
        };
        let desc = if task.description.is_empty() {
            String::new()
        } else {
            format!("  {}", task.description)
        };
        out.push_str(&format!(
            "{} [{:>6}] {}  {}{}{}\n",
            task.status_icon(),
            task.priority.as_str(),
            task.id,
            task.title,
            due,
            desc
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Priority;

    fn make_task(id: &str, title: &str, priority: Priority, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            completed,
            priority,
            due_date: None,
            created_at: "2025-01-01T00:00:00Z".to_string(),
            updated_at: "2025-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn list_is_priority_sorted() {
        let tasks = vec![
            make_task("a", "later", Priority::Low, false),
            make_task("b", "urgent", Priority::High, false),
        ];
        let out = format_task_list(&tasks);
        let urgent_pos = out.find("urgent").unwrap();
        let later_pos = out.find("later").unwrap();
        assert!(urgent_pos < later_pos);
    }

    #[test]
    fn completed_tasks_get_the_x_icon() {
        let tasks = vec![make_task("a", "done thing", Priority::Medium, true)];
        let out = format_task_list(&tasks);
        assert!(out.starts_with("x "));
    }

    #[test]
    fn due_date_is_humanized() {
        let mut task = make_task("a", "dated", Priority::Medium, false);
        task.due_date = Some("2025-06-15T00:00:00Z".to_string());
        let out = format_task_list(&[task]);
        assert!(out.contains("(due: Jun 15, 2025)"));
    }
}
