use crate::error::ReaderError;
use crate::readers::command::{count_lines, run_command};

pub fn count_containers() -> Result<usize, ReaderError> {
    docker_lines(&["ps", "--format", "{{.ID}}"])
}

pub fn count_images() -> Result<usize, ReaderError> {
    docker_lines(&["images", "--format", "{{.ID}}"])
}

pub fn count_volumes() -> Result<usize, ReaderError> {
    docker_lines(&["volume", "ls", "--format", "{{.Name}}"])
}

fn docker_lines(args: &[&str]) -> Result<usize, ReaderError> {
    run_command("docker", args).map(|out| count_lines(&out))
}
