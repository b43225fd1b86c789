fn main() -> std::process::ExitCode {
    mod_installer_lib::run()
}
