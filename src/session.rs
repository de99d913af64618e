use crate::api::SESSION_EXPIRED;
use crate::calendar::{date_key, CalendarRange};
use crate::models::{Task, TaskList, TaskStatus};
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Everything the page shows for the person using this client.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: Option<String>,
    pub token: Option<String>,
    pub daily: Vec<Task>,
    pub today: Vec<Task>,
    pub completed_dates: BTreeSet<String>,
    pub range: CalendarRange,
    message: Option<String>,
}

impl Session {
    pub fn new(range: CalendarRange) -> Self {
        Self {
            username: None,
            token: None,
            daily: Vec::new(),
            today: Vec::new(),
            completed_dates: BTreeSet::new(),
            range,
            message: None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn login(&mut self, username: String, token: String) {
        self.username = Some(username);
        self.token = Some(token);
    }

    /// Replaces both lists and rebuilds the completion log from done daily tasks.
    /// A done task without a recorded date counts for `today`.
    pub fn load_tasks(&mut self, tasks: Vec<Task>, today: NaiveDate) {
        let (daily, other): (Vec<_>, Vec<_>) = tasks.into_iter().partition(|task| task.is_daily);

        self.completed_dates = daily
            .iter()
            .filter(|task| task.status == TaskStatus::Done)
            .map(|task| {
                task.completed_date
                    .clone()
                    .unwrap_or_else(|| date_key(today))
            })
            .collect();
        self.daily = daily;
        self.today = other;
    }

    pub fn logout(&mut self, message: impl Into<String>) {
        self.username = None;
        self.token = None;
        self.daily.clear();
        self.today.clear();
        self.completed_dates.clear();
        self.message = Some(message.into());
    }

    pub fn expire(&mut self) {
        self.logout(SESSION_EXPIRED);
    }

    pub fn flash(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn take_message(&mut self) -> Option<String> {
        self.message.take()
    }

    pub fn list(&self, list: TaskList) -> &[Task] {
        match list {
            TaskList::Daily => &self.daily,
            TaskList::Today => &self.today,
        }
    }

    fn list_mut(&mut self, list: TaskList) -> &mut Vec<Task> {
        match list {
            TaskList::Daily => &mut self.daily,
            TaskList::Today => &mut self.today,
        }
    }

    pub fn find(&self, id: &str) -> Option<&Task> {
        self.daily
            .iter()
            .chain(self.today.iter())
            .find(|task| task.id == id)
    }

    pub fn add_task(&mut self, task: Task) {
        self.list_mut(task.list()).push(task);
    }

    pub fn apply_status(&mut self, updated: Task, today: NaiveDate) {
        let list = match self.find(&updated.id) {
            Some(existing) => existing.list(),
            None => return,
        };

        if list.is_daily() && updated.status == TaskStatus::Done {
            self.completed_dates.insert(date_key(today));
        }

        if let Some(slot) = self
            .list_mut(list)
            .iter_mut()
            .find(|task| task.id == updated.id)
        {
            slot.status = updated.status;
        }
    }

    pub fn apply_move(&mut self, from: TaskList, moved: Task) {
        self.list_mut(from).retain(|task| task.id != moved.id);
        self.add_task(moved);
    }

    pub fn remove_task(&mut self, id: &str) {
        self.daily.retain(|task| task.id != id);
        self.today.retain(|task| task.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn task(id: &str, is_daily: bool, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            text: format!("task {id}"),
            is_daily,
            status,
            completed_date: None,
        }
    }

    fn logged_in() -> Session {
        let mut session = Session::new(CalendarRange::starting(ymd(2024, 1, 1)));
        session.login("ada".to_string(), "token".to_string());
        session
    }

    #[test]
    fn load_tasks_splits_lists_and_rebuilds_log() {
        let mut session = logged_in();
        let mut dated = task("3", true, TaskStatus::Done);
        dated.completed_date = Some("2024-02-01".to_string());

        session.load_tasks(
            vec![
                task("1", true, TaskStatus::Done),
                task("2", false, TaskStatus::Done),
                dated,
                task("4", true, TaskStatus::Pending),
            ],
            ymd(2024, 3, 1),
        );

        assert_eq!(session.daily.len(), 3);
        assert_eq!(session.today.len(), 1);
        assert_eq!(
            session.completed_dates,
            BTreeSet::from(["2024-02-01".to_string(), "2024-03-01".to_string()])
        );
    }

    #[test]
    fn done_daily_task_marks_today() {
        let mut session = logged_in();
        session.load_tasks(
            vec![task("1", true, TaskStatus::Pending), task("2", false, TaskStatus::Pending)],
            ymd(2024, 3, 1),
        );

        session.apply_status(task("2", false, TaskStatus::Done), ymd(2024, 3, 2));
        assert!(session.completed_dates.is_empty());

        session.apply_status(task("1", true, TaskStatus::Done), ymd(2024, 3, 2));
        assert!(session.completed_dates.contains("2024-03-02"));
        assert_eq!(session.daily[0].status, TaskStatus::Done);
    }

    #[test]
    fn move_transfers_between_lists() {
        let mut session = logged_in();
        session.load_tasks(vec![task("1", true, TaskStatus::Done)], ymd(2024, 3, 1));

        session.apply_move(TaskList::Daily, task("1", false, TaskStatus::Pending));
        assert!(session.daily.is_empty());
        assert_eq!(session.list(TaskList::Today)[0].status, TaskStatus::Pending);
    }

    #[test]
    fn expire_clears_everything() {
        let mut session = logged_in();
        session.load_tasks(vec![task("1", true, TaskStatus::Done)], ymd(2024, 3, 1));

        session.expire();
        assert!(!session.is_logged_in());
        assert!(session.username.is_none());
        assert!(session.daily.is_empty());
        assert!(session.completed_dates.is_empty());
        assert_eq!(session.take_message().as_deref(), Some(SESSION_EXPIRED));
        assert_eq!(session.take_message(), None);
    }

    #[test]
    fn remove_task_drops_from_either_list() {
        let mut session = logged_in();
        session.load_tasks(
            vec![task("1", true, TaskStatus::Pending), task("2", false, TaskStatus::Pending)],
            ymd(2024, 3, 1),
        );
        session.remove_task("2");
        session.remove_task("missing");
        assert_eq!(session.daily.len(), 1);
        assert!(session.today.is_empty());
    }
}
