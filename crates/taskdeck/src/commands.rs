//! Subcommand dispatch for the taskdeck CLI.

use std::str::FromStr;

use anyhow::{Context, Result};
use taskdeck_app::{CreateTaskInput, TaskService, TaskStore, TaskUpdate};
use taskdeck_core::{SortKey, Stamp, Status, StatusAction, Task, TaskId, TaskQuery};

use crate::{Command, LsFormat};

pub fn run<S: TaskStore>(command: Command, service: &TaskService<S>) -> Result<()> {
    match command {
        Command::New { title, desc, tags } => {
            handle_new(service, title, desc, tags);
            Ok(())
        }
        Command::Show { id } => handle_show(service, &id),
        Command::Start { id } => handle_transition(service, &id, StatusAction::Start),
        Command::Finish { id } => handle_transition(service, &id, StatusAction::Finish),
        Command::Delete { id } => handle_delete(service, &id),
        Command::Update { id, title, desc } => handle_update(service, &id, title, desc),
        Command::Ls {
            status,
            tag,
            sort,
            search,
            format,
        } => handle_ls(service, status, tag, sort, search, format),
    }
}

fn handle_new<S: TaskStore>(
    service: &TaskService<S>,
    title: String,
    desc: String,
    tags: Vec<String>,
) {
    let task = service.create(CreateTaskInput { title, desc, tags });
    println!("created task {}: {}", task.id, task.title);
}

fn handle_show<S: TaskStore>(service: &TaskService<S>, id: &str) -> Result<()> {
    let id = parse_task_id(id)?;
    match service.get(id) {
        Some(task) => println!("{}", serde_json::to_string_pretty(&task)?),
        None => println!("task {id} not found"),
    }
    Ok(())
}

fn handle_transition<S: TaskStore>(
    service: &TaskService<S>,
    id: &str,
    action: StatusAction,
) -> Result<()> {
    let id = parse_task_id(id)?;
    if service.set_status(id, action) {
        println!("task {id} is now {}", action.target().as_str());
    } else {
        println!("task {id} not found");
    }
    Ok(())
}

fn handle_delete<S: TaskStore>(service: &TaskService<S>, id: &str) -> Result<()> {
    let id = parse_task_id(id)?;
    if service.delete(id) {
        println!("deleted task {id}");
    } else {
        println!("task {id} not found");
    }
    Ok(())
}

fn handle_update<S: TaskStore>(
    service: &TaskService<S>,
    id: &str,
    title: Option<String>,
    desc: Option<String>,
) -> Result<()> {
    let id = parse_task_id(id)?;
    service.update(id, TaskUpdate { title, desc })?;
    println!("updated task {id}");
    Ok(())
}

fn handle_ls<S: TaskStore>(
    service: &TaskService<S>,
    status: Option<String>,
    tag: Option<String>,
    sort: Option<String>,
    search: Option<String>,
    format: LsFormat,
) -> Result<()> {
    let query = build_query(status, tag, sort, search)?;
    let filtered = !query.is_empty();
    let tasks = service.list(&query);

    if tasks.is_empty() {
        if filtered {
            println!("no tasks matched the provided filters");
        } else {
            println!("no tasks found");
        }
        return Ok(());
    }

    match format {
        LsFormat::Table => render_task_table(&tasks),
        LsFormat::Json => println!("{}", serde_json::to_string_pretty(&tasks)?),
    }
    Ok(())
}

fn build_query(
    status: Option<String>,
    tag: Option<String>,
    sort: Option<String>,
    search: Option<String>,
) -> Result<TaskQuery> {
    let status = status
        .as_deref()
        .map(Status::from_str)
        .transpose()
        .context("invalid --status value")?;
    let sort = sort
        .as_deref()
        .map(SortKey::from_str)
        .transpose()
        .context("invalid --sort value")?;
    Ok(TaskQuery {
        status,
        tag,
        text: search,
        sort,
    })
}

fn render_task_table(tasks: &[Task]) {
    println!("ID | Status | Title | Tags | Created | Started | Finished");
    println!("-- | ------ | ----- | ---- | ------- | ------- | --------");

    for task in tasks {
        let tags = if task.tags.is_empty() {
            "-".to_owned()
        } else {
            task.tags.join(", ")
        };
        let started = task.started_at.as_ref().map_or("-", Stamp::as_str);
        let finished = task.finished_at.as_ref().map_or("-", Stamp::as_str);

        println!(
            "{} | {} | {} | {} | {} | {} | {}",
            task.id,
            task.status.as_str(),
            task.title,
            tags,
            task.created_at,
            started,
            finished
        );
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId> {
    TaskId::from_str(raw).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    #[derive(Clone, Default)]
    struct MockStore {
        inner: Arc<Mutex<Vec<Task>>>,
    }

    impl TaskStore for MockStore {
        type Error = anyhow::Error;

        fn load_tasks(&self) -> Result<Vec<Task>, Self::Error> {
            Ok(guard(&self.inner).clone())
        }

        fn save_tasks(&self, tasks: &[Task]) -> Result<(), Self::Error> {
            *guard(&self.inner) = tasks.to_vec();
            Ok(())
        }
    }

    impl MockStore {
        fn stored(&self) -> Vec<Task> {
            guard(&self.inner).clone()
        }
    }

    fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn service_with_store() -> (TaskService<MockStore>, MockStore) {
        let store = MockStore::default();
        let service = TaskService::new(store.clone());
        (service, store)
    }

    fn fail_if<T>(result: Result<T>, context: &str) -> T {
        result.unwrap_or_else(|err| panic!("{context}: {err}"))
    }

    #[test]
    fn run_new_creates_a_task() {
        let (service, store) = service_with_store();
        fail_if(
            run(
                Command::New {
                    title: "via run".to_owned(),
                    desc: String::new(),
                    tags: vec!["cli".to_owned()],
                },
                &service,
            ),
            "run new",
        );

        let stored = store.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "via run");
        assert_eq!(stored[0].tags, vec!["cli"]);
    }

    #[test]
    fn run_start_transitions_the_task() {
        let (service, store) = service_with_store();
        fail_if(
            run(
                Command::New {
                    title: "a".to_owned(),
                    desc: String::new(),
                    tags: Vec::new(),
                },
                &service,
            ),
            "run new",
        );
        fail_if(run(Command::Start { id: "1".to_owned() }, &service), "run start");

        assert_eq!(store.stored()[0].status, Status::InProgress);
    }

    #[test]
    fn run_delete_removes_the_task() {
        let (service, store) = service_with_store();
        fail_if(
            run(
                Command::New {
                    title: "a".to_owned(),
                    desc: String::new(),
                    tags: Vec::new(),
                },
                &service,
            ),
            "run new",
        );
        fail_if(run(Command::Delete { id: "1".to_owned() }, &service), "run delete");

        assert!(store.stored().is_empty());
    }

    #[test]
    fn invalid_id_is_rejected_before_any_store_access() {
        let (service, _store) = service_with_store();
        assert!(run(Command::Delete { id: "0".to_owned() }, &service).is_err());
        assert!(run(Command::Show { id: "abc".to_owned() }, &service).is_err());
    }

    #[test]
    fn update_of_missing_task_bubbles_not_found() {
        let (service, _store) = service_with_store();
        let result = run(
            Command::Update {
                id: "9".to_owned(),
                title: Some("new".to_owned()),
                desc: None,
            },
            &service,
        );
        let Err(err) = result else {
            panic!("expected not-found error");
        };
        assert!(err.to_string().contains("no task found"));
    }

    #[test]
    fn build_query_parses_tokens() {
        let query = fail_if(
            build_query(
                Some("in_progress".to_owned()),
                Some("work".to_owned()),
                Some("started_at".to_owned()),
                Some("report".to_owned()),
            ),
            "build query",
        );
        assert_eq!(query.status, Some(Status::InProgress));
        assert_eq!(query.tag.as_deref(), Some("work"));
        assert_eq!(query.sort, Some(SortKey::StartedAt));
        assert_eq!(query.text.as_deref(), Some("report"));
    }

    #[test]
    fn build_query_rejects_unknown_tokens() {
        assert!(build_query(Some("archived".to_owned()), None, None, None).is_err());
        assert!(build_query(None, None, Some("priority".to_owned()), None).is_err());
    }
}
