//! Default file contents written by remediations.

use crate::config::PackageManager;

const INDEX_JS: &str = r"import React from 'react';
import ReactDOM from 'react-dom';
import App from './App';
import './styles.css';

ReactDOM.render(
  <React.StrictMode>
    <App />
  </React.StrictMode>,
  document.getElementById('root')
);
";

const APP_JS: &str = r#"import React from 'react';
import { BrowserRouter as Router, Route, Switch } from 'react-router-dom';
import Navigation from './components/Navigation';
import Home from './pages/Home';

function App() {
  return (
    <Router>
      <div className="app">
        <Navigation />
        <Switch>
          <Route path="/" exact component={Home} />
        </Switch>
      </div>
    </Router>
  );
}

export default App;
"#;

const STYLES_CSS: &str = r"body {
  margin: 0;
  font-family: Arial, sans-serif;
  color: #333333;
  background: #f0f0f0;
}

.app {
  max-width: 800px;
  margin: 0 auto;
  padding: 20px;
}

.navigation ul {
  list-style-type: none;
  padding: 0;
}

.navigation li {
  display: inline;
  margin-right: 10px;
}
";

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Dywo App</title>
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

const NAVIGATION_JS: &str = r#"import React from 'react';
import { Link } from 'react-router-dom';

function Navigation() {
  return (
    <nav className="navigation">
      <ul>
        <li><Link to="/">Home</Link></li>
      </ul>
    </nav>
  );
}

export default Navigation;
"#;

const HOME_JS: &str = r#"import React from 'react';

function Home() {
  return (
    <main className="home">
      <h1>Welcome to Dywo</h1>
      <p>Edit src/pages/Home.js to get started.</p>
    </main>
  );
}

export default Home;
"#;

/// `webpack.config.js`: hands `webpack.config.json` to webpack with its
/// string conditions compiled and its output path made absolute.
pub const BUNDLER_LOADER_JS: &str = r"// Generated by dywo. Edit webpack.config.json instead.
const path = require('path');
const config = require('./webpack.config.json');

const CONDITIONS = ['test', 'include', 'exclude'];

function compileRule(rule) {
  const compiled = { ...rule };
  for (const key of CONDITIONS) {
    if (typeof compiled[key] === 'string') {
      compiled[key] = new RegExp(compiled[key]);
    }
  }
  return compiled;
}

const output = config.output || {};
const rules = (config.module && config.module.rules) || [];

module.exports = {
  ...config,
  mode: config.mode || 'production',
  output: { ...output, path: path.resolve(__dirname, output.path || 'dist') },
  module: { ...config.module, rules: rules.map(compileRule) },
};
";

/// Template for a file, keyed by its basename. Unknown names are empty.
#[must_use]
pub fn for_basename(basename: &str) -> &'static str {
    match basename {
        "index.js" => INDEX_JS,
        "App.js" => APP_JS,
        "styles.css" => STYLES_CSS,
        "index.html" => INDEX_HTML,
        "Navigation.js" => NAVIGATION_JS,
        "Home.js" => HOME_JS,
        _ => "",
    }
}

/// Section headers every README must carry.
pub const README_SECTIONS: [&str; 2] = ["## Getting Started", "## Scripts"];

/// Body of a README section, header included.
#[must_use]
pub fn readme_section(header: &str, pm: PackageManager) -> String {
    let bin = pm.binary();
    match header {
        "## Getting Started" => format!(
            "## Getting Started\n\nInstall dependencies and start the development server:\n\n\
             ```sh\n{bin} install\n{run_dev}\n```\n",
            run_dev = pm.run_script_command("dev"),
        ),
        "## Scripts" => format!(
            "## Scripts\n\n\
             - `{dev}`: start the development server\n\
             - `{build}`: build for production\n\
             - `{start}`: serve the application\n",
            dev = pm.run_script_command("dev"),
            build = pm.run_script_command("build"),
            start = pm.run_script_command("start"),
        ),
        other => format!("{other}\n"),
    }
}

/// A complete default README.
#[must_use]
pub fn readme(project_name: &str, pm: PackageManager) -> String {
    let mut doc = format!("# {project_name}\n\nA single-page application managed with Dywo.\n");
    for header in README_SECTIONS {
        doc.push('\n');
        doc.push_str(&readme_section(header, pm));
    }
    doc
}
