use console::style;

const HEADER_WIDTH: usize = 74;

pub fn render_header() {
    let border = "─".repeat(HEADER_WIDTH - 2);
    println!("\n{}", style(format!("┌{}┐", border)).cyan());
    println!(
        "{}",
        style(format!(
            "│ {:^inner_width$} │",
            "▸ METACleaner · Inspector y Limpiador de Metadata ◂",
            inner_width = HEADER_WIDTH - 4
        ))
        .cyan()
        .bold()
    );
    println!("{}\n", style(format!("└{}┘", border)).cyan());
}

pub fn render_intro() {
    let hint_lines = [
        "┌─ Arrastra archivos a la terminal o escribe sus rutas:",
        "│   • Varias rutas separadas por espacios",
        "│   • Rutas con espacios entre comillas dobles",
        "└─",
    ];

    for line in hint_lines.iter() {
        println!("{}", style(line).cyan().dim());
    }

    println!();
}

pub fn render_help() {
    let help_lines = [
        "┌─ Comandos disponibles:",
        "│   <rutas>          inspecciona los archivos indicados",
        "│   limpiar          elimina la metadata del lote actual",
        "│   exportar <ruta>  guarda el último reporte como JSON",
        "│   ayuda            muestra esta ayuda",
        "│   salir            termina el programa",
        "└─",
    ];

    for line in help_lines.iter() {
        println!("{}", style(line).cyan());
    }
}

pub fn render_clean_hint() {
    println!(
        "{}",
        style("Escribe `limpiar` para eliminar la metadata de estos archivos.").dim()
    );
}
