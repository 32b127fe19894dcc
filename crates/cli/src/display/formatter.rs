use testscope_core::{CommandDescriptor, RunConfiguration};

/// Print the parts of a descriptor, one bullet each
pub fn print_descriptor(descriptor: &CommandDescriptor) {
    println!("   🔧 Command breakdown:");
    println!("      • subcommand: {}", descriptor.subcommand);
    for target in &descriptor.targets {
        println!("      • target: {}", target.spec());
    }
    if descriptor.has_filter() {
        println!("      • filter: {}", descriptor.path_filter);
    } else {
        println!("      • filter: (none, runs every test)");
    }
    if !descriptor.flags.is_empty() {
        let flags: Vec<&str> = descriptor.flags.iter().map(String::as_str).collect();
        println!("      • flags: {}", flags.join(" "));
    }
}

/// Print a stored configuration with the user's extras
pub fn print_configuration(config: &RunConfiguration) {
    println!("📋 {}", config.name);
    println!("   {}", config.to_command().to_shell_command());
    if let Some(dir) = &config.working_dir {
        println!("   • working dir: {}", dir.display());
    }
    for (key, value) in &config.env {
        println!("   • env: {key}={value}");
    }
}
